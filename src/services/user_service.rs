// ============================================================================
// USER SERVICE - Perfil del usuario actual y búsqueda
// ============================================================================

use serde_json::Value;

use crate::error::ApiError;
use crate::models::{UserProfile, UserSummary};
use crate::services::api_client::{ApiClient, QueryParams};
use crate::services::decode::{decode_items, decode_shape};
use crate::utils::endpoints::{user, with_id};

#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Perfil del usuario de la sesión. Requiere id y token persistidos.
    pub async fn current_profile(&self, select: &[&str]) -> Result<UserProfile, ApiError> {
        let (Some(user_id), Some(_)) = (self.client.current_user_id(), self.client.session_token()) else {
            return Err(ApiError::Validation("User ID or token not found in session".to_string()));
        };

        let params = QueryParams::new().select(select);
        let value: Value = self.client.get(&with_id(user::GET_BY_ID, &user_id), &params).await?;
        decode_shape(value, "user")
    }

    pub async fn search(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        let params = QueryParams::new().param("q", query);
        let value: Value = self.client.get(user::SEARCH, &params).await?;
        decode_items(value, "users", "users")
    }
}
