// ============================================================================
// LIST RESOURCES - Adaptadores servicio → controlador paginado
// ============================================================================

use std::rc::Rc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{Entity, Project, ProjectDraft, Supplier, SupplierDraft};
use crate::services::project_service::ProjectService;
use crate::services::supplier_service::{SupplierQuery, SupplierService};

/// Página a pedir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Empieza en 1
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
}

/// Página recibida. `total_pages` es `None` si el endpoint no lo informa.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBatch<T> {
    pub items: Vec<T>,
    pub total_pages: Option<u32>,
}

/// Colección del backend que un listado puede leer, ampliar y recortar
#[async_trait(?Send)]
pub trait ListResource {
    type Item: Entity + Clone;
    type Draft;

    /// Nombre en plural para los mensajes al usuario ("projects")
    fn name(&self) -> &'static str;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageBatch<Self::Item>, ApiError>;

    async fn create(&self, draft: &Self::Draft) -> Result<Self::Item, ApiError>;

    async fn remove(&self, id: &str) -> Result<(), ApiError>;
}

/// Proyectos del usuario de la sesión
#[derive(Clone)]
pub struct ProjectsResource {
    service: ProjectService,
    user_id: Rc<dyn Fn() -> Option<String>>,
}

impl ProjectsResource {
    /// `user_id` se consulta en cada página (la sesión puede cambiar entre páginas)
    pub fn new(service: ProjectService, user_id: impl Fn() -> Option<String> + 'static) -> Self {
        Self {
            service,
            user_id: Rc::new(user_id),
        }
    }
}

#[async_trait(?Send)]
impl ListResource for ProjectsResource {
    type Item = Project;
    type Draft = ProjectDraft;

    fn name(&self) -> &'static str {
        "projects"
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<PageBatch<Project>, ApiError> {
        let user_id = (self.user_id)()
            .ok_or_else(|| ApiError::Validation("User ID not found in session".to_string()))?;

        let items = self
            .service
            .list_by_user(&user_id, request.page, request.page_size, request.search.as_deref())
            .await?;

        Ok(PageBatch {
            items,
            total_pages: None,
        })
    }

    async fn create(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        self.service.create(draft).await
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.service.remove(id).await
    }
}

/// Todos los proveedores, orden alfabético, con total de páginas
#[derive(Clone)]
pub struct SuppliersResource {
    service: SupplierService,
}

impl SuppliersResource {
    pub fn new(service: SupplierService) -> Self {
        Self { service }
    }
}

#[async_trait(?Send)]
impl ListResource for SuppliersResource {
    type Item = Supplier;
    type Draft = SupplierDraft;

    fn name(&self) -> &'static str {
        "suppliers"
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<PageBatch<Supplier>, ApiError> {
        let query = SupplierQuery {
            page: request.page,
            limit: request.page_size,
            search: request.search,
        };
        let page = self.service.list(&query).await?;

        Ok(PageBatch {
            items: page.suppliers,
            total_pages: Some(page.total_pages),
        })
    }

    async fn create(&self, draft: &SupplierDraft) -> Result<Supplier, ApiError> {
        self.service.create(draft).await
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.service.remove(id).await
    }
}
