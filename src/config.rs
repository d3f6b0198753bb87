// ============================================================================
// CONFIG - Configuración de compilación (option_env!) del dashboard
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::utils::MAX_EXPIRY_DAYS;

const DEFAULT_BACKEND_URL_DEVELOPMENT: &str = "http://localhost:5000/api";
const DEFAULT_BACKEND_URL_PRODUCTION: &str = "https://pm-service.vercel.app/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub network_timeout_seconds: u64,
    pub session_expiry_days: i64,
    pub pagination: PaginationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: DEFAULT_BACKEND_URL_DEVELOPMENT.to_string(),
            backend_url_production: DEFAULT_BACKEND_URL_PRODUCTION.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            network_timeout_seconds: 30,
            session_expiry_days: 1,
            pagination: PaginationConfig::default(),
        }
    }
}

/// Tamaños de página por recurso
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub projects_page_size: u32,
    pub suppliers_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            projects_page_size: 9,
            suppliers_page_size: 10,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .unwrap_or(DEFAULT_BACKEND_URL_DEVELOPMENT).to_string(),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .unwrap_or(DEFAULT_BACKEND_URL_PRODUCTION).to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            network_timeout_seconds: parse_or(
                option_env!("NETWORK_TIMEOUT_SECONDS"),
                defaults.network_timeout_seconds,
            ),
            session_expiry_days: parse_or(option_env!("SESSION_EXPIRY_DAYS"), defaults.session_expiry_days)
                .clamp(1, MAX_EXPIRY_DAYS),
            pagination: PaginationConfig {
                projects_page_size: parse_or(
                    option_env!("PROJECTS_PAGE_SIZE"),
                    defaults.pagination.projects_page_size,
                )
                .max(1),
                suppliers_page_size: parse_or(
                    option_env!("SUPPLIERS_PAGE_SIZE"),
                    defaults.pagination.suppliers_page_size,
                )
                .max(1),
            },
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, fallback: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(fallback)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
