// ============================================================================
// ENDPOINTS - Rutas REST del backend (relativas a la URL base)
// ============================================================================

use url::Url;

pub mod user {
    pub const GET_BY_ID: &str = "/user/get/:id";
    pub const LOGIN: &str = "/user/login";
    pub const LOGOUT: &str = "/user/logout";
    pub const CHECK_LOGIN: &str = "/current/user";
    pub const SEARCH: &str = "/user/search";
}

pub mod project {
    pub const GET_BY_USER: &str = "/project/get/byUser/:id";
    pub const GET_BY_ID: &str = "/project/get/:id";
    pub const CREATE: &str = "/project/create";
    pub const REMOVE: &str = "/project/remove/:id";
    pub const SEARCH: &str = "/project/search";
    pub const DASHBOARD: &str = "/project/dashboard/:id";
}

pub mod supplier {
    pub const GET_ALL: &str = "/supplier/get/all";
    pub const GET_BY_ID: &str = "/supplier/get/:id";
    pub const CREATE: &str = "/supplier/create";
    pub const REMOVE: &str = "/supplier/remove/:id";
    pub const SEARCH: &str = "/supplier/search";
}

pub mod capex {
    pub const GET_ALL: &str = "/capex/get/all";
    pub const GET_BY_ID: &str = "/capex/get/:id";
    pub const CREATE: &str = "/capex/create";
    pub const REMOVE: &str = "/capex/delete/:id";
    pub const SEARCH: &str = "/capex/search";
}

/// Sustituye el placeholder `:id` de una ruta por `id` como un único segmento
/// (`/`, `?`, `#`, espacios... van codificados)
pub fn with_id(template: &str, id: &str) -> String {
    template.replace(":id", &encode_segment(id))
}

fn encode_segment(segment: &str) -> String {
    // URL auxiliar: solo se usa el encoder de segmentos de `url`
    let Ok(mut scratch) = Url::parse("http://segment.local/") else {
        return segment.to_string();
    };
    if let Ok(mut segments) = scratch.path_segments_mut() {
        segments.clear().push(segment);
    }
    scratch.path().trim_start_matches('/').to_string()
}
