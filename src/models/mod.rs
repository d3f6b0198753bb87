pub mod auth;
pub mod entity;
pub mod project;
pub mod supplier;
pub mod order;
pub mod user;

pub use auth::{Credentials, Identity, LoginResponse, CurrentUserResponse};
pub use entity::Entity;
pub use project::{Project, ProjectDraft, ProjectMember, ProjectStatus, ProjectStatusEntry};
pub use supplier::{Supplier, SupplierDraft, SupplierPage};
pub use order::{Order, OrderDraft, OrderPage};
pub use user::{UserAddress, UserProfile, UserRef, UserSummary};
