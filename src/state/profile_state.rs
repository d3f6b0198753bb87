// ============================================================================
// PROFILE STATE - Perfil del usuario de la sesión (carga única)
// ============================================================================

use serde::Serialize;

use crate::models::UserProfile;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileState {
    pub profile: Option<UserProfile>,
    /// Se pide una sola vez por sesión, haya ido bien o mal
    pub has_fetched: bool,
    pub is_fetching: bool,
    pub error: Option<String>,
}
