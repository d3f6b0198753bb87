pub mod transport;
pub mod api_client;
pub mod auth_service;
pub mod project_service;
pub mod supplier_service;
pub mod capex_service;
pub mod user_service;
pub mod resource;
mod decode;

pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use api_client::{ApiClient, QueryParams};
pub use auth_service::{AuthService, LoginGrant};
pub use project_service::ProjectService;
pub use supplier_service::{SupplierQuery, SupplierService};
pub use capex_service::CapexService;
pub use user_service::UserService;
pub use resource::{ListResource, PageBatch, PageRequest, ProjectsResource, SuppliersResource};

#[cfg(target_arch = "wasm32")]
pub use transport::GlooTransport;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;
