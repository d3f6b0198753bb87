// ============================================================================
// ERRORES - Taxonomía única para red, validación y almacenamiento
// ============================================================================

use thiserror::Error;

/// Todos los fallos que el cliente puede devolver.
///
/// Un 401 es un [`ApiError::Http`] más; solo el bootstrap de sesión lo trata
/// aparte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Fallo de conexión, sin status HTTP
    #[error("Network error: {0}")]
    Network(String),

    /// Respuesta no 2xx
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Cuerpo que no es JSON válido para el tipo esperado
    #[error("Parse error: {0}")]
    Decode(String),

    /// Forma de respuesta incorrecta, o falta un valor local obligatorio
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }

    /// Mensaje que se muestra junto a un listado cuando falló la carga de `resource`.
    ///
    /// Los mensajes de Validation ya son para el usuario y pasan tal cual.
    pub fn user_message(&self, resource: &str) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            _ => format!("Failed to fetch {}. Please try again later.", resource),
        }
    }
}
