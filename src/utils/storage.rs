// ============================================================================
// STORAGE - Persistencia de sesión con expiración por entrada
// ============================================================================
// En el navegador: localStorage (gloo-storage). En tests/nativo: memoria.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Almacén clave/valor de la sesión.
///
/// Una entrada expirada se comporta igual que una ausente.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str, expires_at: Option<DateTime<Utc>>) -> Result<(), ApiError>;
    fn remove(&self, key: &str) -> Result<(), ApiError>;
}

/// Tope de expiración de sesión, en días
pub const MAX_EXPIRY_DAYS: i64 = 3650;

/// Fecha de expiración a `days` días desde ahora (acotado a `1..=MAX_EXPIRY_DAYS`)
pub fn expiry_in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days.clamp(1, MAX_EXPIRY_DAYS))
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct StoredEntry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |expires_at| expires_at <= now)
    }
}

/// Storage en memoria (nativo y tests)
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, StoredEntry>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.borrow_mut();
        let expired = entries.get(key)?.is_expired(Utc::now());
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: &str, expires_at: Option<DateTime<Utc>>) -> Result<(), ApiError> {
        self.entries.borrow_mut().insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// localStorage del navegador, cada valor envuelto con su expiración
#[cfg(target_arch = "wasm32")]
#[derive(Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};

        let entry = LocalStorage::get::<StoredEntry>(key).ok()?;
        if entry.is_expired(Utc::now()) {
            log::info!("⌛ Entrada de sesión expirada: {}", key);
            LocalStorage::delete(key);
            return None;
        }
        Some(entry.value)
    }

    fn set(&self, key: &str, value: &str, expires_at: Option<DateTime<Utc>>) -> Result<(), ApiError> {
        use gloo_storage::{LocalStorage, Storage};

        let entry = StoredEntry {
            value: value.to_string(),
            expires_at,
        };
        LocalStorage::set(key, &entry).map_err(|e| {
            log::error!("❌ Error guardando {} en localStorage: {}", key, e);
            ApiError::Storage(format!("Error guardando {}: {}", key, e))
        })
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::delete(key);
        Ok(())
    }
}
