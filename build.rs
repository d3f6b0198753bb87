use std::env;
use std::fs;
use std::path::Path;

/// Variables read through `option_env!` in `src/config.rs`.
const CONFIG_KEYS: &[&str] = &[
    "BACKEND_URL_DEVELOPMENT",
    "BACKEND_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "NETWORK_TIMEOUT_SECONDS",
    "SESSION_EXPIRY_DAYS",
    "PROJECTS_PAGE_SIZE",
    "SUPPLIERS_PAGE_SIZE",
];

fn main() {
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    if !env_file.exists() {
        println!("cargo:warning=No .env file found, dashboard config falls back to defaults.");
        println!("cargo:rerun-if-changed=build.rs");
        return;
    }

    println!("cargo:rerun-if-changed=.env");

    if let Ok(contents) = fs::read_to_string(env_file) {
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Real environment wins over .env
            if env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}
