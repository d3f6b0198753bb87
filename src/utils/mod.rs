// Utils compartidos

pub mod constants;
pub mod endpoints;
pub mod storage;

pub use constants::*;
pub use storage::{expiry_in_days, MemoryStorage, SessionStorage, MAX_EXPIRY_DAYS};

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
