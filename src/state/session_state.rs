// ============================================================================
// SESSION STATE - Estado de autenticación del cliente
// ============================================================================

use serde::Serialize;

/// Estados de la máquina de sesión
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// Antes de `bootstrap`
    #[default]
    Unknown,
    Authenticating,
    Authenticated { role: String, user_id: String },
    Unauthenticated,
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated { .. })
    }

    pub fn role(&self) -> Option<&str> {
        match self {
            AuthStatus::Authenticated { role, .. } => Some(role),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthStatus::Authenticated { user_id, .. } => Some(user_id),
            _ => None,
        }
    }
}

/// Vista plana de la sesión para las vistas
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub role: Option<String>,
    pub is_authenticated: bool,
}

impl Session {
    /// `token` solo cuenta si el estado es `Authenticated`
    pub fn from_status(status: &AuthStatus, token: Option<String>) -> Self {
        match status {
            AuthStatus::Authenticated { role, user_id } if token.is_some() => Self {
                token,
                user_id: Some(user_id.clone()),
                role: Some(role.clone()),
                is_authenticated: true,
            },
            _ => Self {
                token,
                ..Self::default()
            },
        }
    }
}
