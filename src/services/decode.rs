// Decodificación de formas de respuesta: todo error de forma es Validation

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

fn invalid_format(resource: &str) -> ApiError {
    ApiError::Validation(format!("Failed to fetch {}. Invalid response format.", resource))
}

/// Lista que llega como `{ <field>: [...] }` o directamente como array
pub(crate) fn decode_items<T: DeserializeOwned>(value: Value, field: &str, resource: &str) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut object) => object.remove(field).ok_or_else(|| invalid_format(resource))?,
        _ => return Err(invalid_format(resource)),
    };

    if !items.is_array() {
        return Err(invalid_format(resource));
    }

    serde_json::from_value(items).map_err(|e| {
        log::warn!("⚠️ Forma inesperada en {}: {}", resource, e);
        invalid_format(resource)
    })
}

/// Cuerpo completo con forma fija
pub(crate) fn decode_shape<T: DeserializeOwned>(value: Value, resource: &str) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| {
        log::warn!("⚠️ Forma inesperada en {}: {}", resource, e);
        invalid_format(resource)
    })
}

/// Entidad recién creada en `{ <field>: {...} }`; sin `_id` es un error
pub(crate) fn decode_created<T: DeserializeOwned>(value: Value, field: &str, resource: &str) -> Result<T, ApiError> {
    let invalid = || ApiError::Validation(format!("Invalid {} data returned", resource));

    let created = match value {
        Value::Object(mut object) => object.remove(field).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };

    serde_json::from_value(created).map_err(|e| {
        log::warn!("⚠️ {} creado sin datos válidos: {}", resource, e);
        invalid()
    })
}
