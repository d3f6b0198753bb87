/// Claves de sesión persistidas (compartidas con el backend y otras pestañas)
pub const STORAGE_KEY_TOKEN: &str = "token";
pub const STORAGE_KEY_ROLE: &str = "userRole";
pub const STORAGE_KEY_USER_ID: &str = "userId";
pub const STORAGE_KEY_AUTHENTICATED: &str = "setIsAuthenticated";

/// Todas las claves que se borran juntas en logout o validación fallida
pub const SESSION_KEYS: [&str; 4] = [
    STORAGE_KEY_TOKEN,
    STORAGE_KEY_ROLE,
    STORAGE_KEY_USER_ID,
    STORAGE_KEY_AUTHENTICATED,
];

/// Parámetros fijos del listado de proveedores
pub const SUPPLIER_LIST_SELECT: &[&str] = &["name", "contactPerson", "address", "logo"];
pub const SUPPLIER_LIST_SORT: &str = "name:asc";
pub const SUPPLIER_LIST_POPULATE: &str =
    "contactPerson:firstname lastname email status lastActive position phoneNumber avatarImage";

/// Campos pedidos para el perfil del usuario actual
pub const USER_PROFILE_SELECT: &[&str] = &[
    "username", "firstname", "lastname", "email", "phoneNumber", "position",
    "avatarImage", "status", "type", "lastActive", "address", "bio", "skills",
    "hobbies", "company", "hireDate",
];
