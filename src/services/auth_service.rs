// ============================================================================
// AUTH SERVICE - login, validación de sesión y logout contra el backend
// ============================================================================
// Toda la forma de respuesta (incluido `user._doc`) se decodifica aquí.
// ============================================================================

use serde_json::Value;

use crate::error::ApiError;
use crate::models::{Credentials, CurrentUserResponse, Identity, LoginResponse};
use crate::services::api_client::{ApiClient, QueryParams};
use crate::services::transport::Method;
use crate::utils::endpoints::user;

/// Token y usuario devueltos por un login correcto
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub identity: Identity,
}

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Login con email y contraseña
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        log::info!("🔐 Login para: {}", credentials.email);
        let value: Value = self.client.post(user::LOGIN, credentials).await?;
        decode_login(value)
    }

    /// Valida el token persistido y devuelve a quién pertenece
    pub async fn current_user(&self) -> Result<Identity, ApiError> {
        let value: Value = self.client.get(user::CHECK_LOGIN, &QueryParams::new()).await?;
        decode_current_user(value)
    }

    /// Invalida `token` en el servidor. No toca la sesión local.
    pub async fn logout(&self, token: Option<String>) -> Result<(), ApiError> {
        let _: Value = self
            .client
            .request_with_token(Method::Post, user::LOGOUT, &QueryParams::new(), None, token)
            .await?;
        Ok(())
    }
}

/// `{ token, user: { type, id } }`
pub fn decode_login(value: Value) -> Result<LoginGrant, ApiError> {
    let response: LoginResponse = serde_json::from_value(value)
        .map_err(|e| ApiError::Validation(format!("Unexpected login response: {}", e)))?;

    if response.token.is_empty() {
        return Err(ApiError::Validation("Login response without token".to_string()));
    }

    Ok(LoginGrant {
        token: response.token,
        identity: Identity {
            role: response.user.role,
            user_id: response.user.id,
        },
    })
}

/// `{ user: { _doc: { type, _id } } }`
pub fn decode_current_user(value: Value) -> Result<Identity, ApiError> {
    let response: CurrentUserResponse = serde_json::from_value(value)
        .map_err(|e| ApiError::Validation(format!("Unexpected current user response: {}", e)))?;

    Ok(Identity {
        role: response.user.doc.role,
        user_id: response.user.doc.id,
    })
}
