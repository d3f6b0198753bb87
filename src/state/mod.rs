// ============================================================================
// STATE MODULE - State Management con RefCell + notificaciones
// ============================================================================

pub mod reactivity;
pub mod page_state;
pub mod session_state;
pub mod profile_state;

pub use reactivity::*;
pub use page_state::*;
pub use session_state::*;
pub use profile_state::*;
