// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Adjunta el bearer token de la sesión, serializa query params y decodifica
// JSON. NO reintenta: cada error se loguea y se devuelve tal cual.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::services::transport::{HttpRequest, HttpTransport, Method};
use crate::utils::{SessionStorage, STORAGE_KEY_TOKEN, STORAGE_KEY_USER_ID};

/// Builder de query string; los pares salen en orden de inserción
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn param_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Selección de campos como `select=a,b,c`. Lista vacía = sin parámetro
    pub fn select(self, fields: &[&str]) -> Self {
        if fields.is_empty() {
            self
        } else {
            self.param("select", fields.join(","))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Cliente API - stateless salvo por el acceso de lectura a la sesión
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    storage: Rc<dyn SessionStorage>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn SessionStorage>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token persistido, si existe y no expiró
    pub fn session_token(&self) -> Option<String> {
        self.storage.get(STORAGE_KEY_TOKEN)
    }

    /// Id del usuario de la sesión actual
    pub fn current_user_id(&self) -> Option<String> {
        self.storage.get(STORAGE_KEY_USER_ID)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryParams) -> Result<T, ApiError> {
        self.request(Method::Get, path, query, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = to_body(body)?;
        self.request(Method::Post, path, &QueryParams::new(), Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Delete, path, &QueryParams::new(), None).await
    }

    /// Request autenticada con el token de la sesión.
    ///
    /// Sin token la request sale igual, sin cabecera; el backend la rechaza
    /// con 401 y ese error sube sin tocar.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let token = self.session_token();
        self.request_with_token(method, path, query, body, token).await
    }

    /// Igual que [`ApiClient::request`] con un bearer token explícito
    pub async fn request_with_token<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<Value>,
        token: Option<String>,
    ) -> Result<T, ApiError> {
        let result = self.send_once(method, path, query, body, token).await;
        if let Err(e) = &result {
            log::error!("❌ {} {}: {}", method, path, e);
        }
        result
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<Value>,
        bearer: Option<String>,
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        let request = HttpRequest {
            method,
            url,
            bearer,
            body,
        };

        let response = self.transport.send(request).await?;

        if !response.ok() {
            return Err(ApiError::Http {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        // DELETE y algunos POST responden sin cuerpo
        let text = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };

        serde_json::from_str::<T>(text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn url(&self, path: &str, query: &QueryParams) -> Result<String, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw)
            .map_err(|e| ApiError::Validation(format!("URL inválida {}: {}", raw, e)))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                query.pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }

        Ok(url.to_string())
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Validation(format!("Serialization error: {}", e)))
}

/// Extrae `message`/`error` del cuerpo de error del backend, o el texto crudo
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    match message {
        Some(message) => message,
        None if body.trim().is_empty() => "Unknown error".to_string(),
        None => body.trim().to_string(),
    }
}
