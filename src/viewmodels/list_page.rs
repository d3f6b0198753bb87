// ============================================================================
// LIST PAGE - Alta/baja sobre un listado paginado
// ============================================================================
// Después de crear o borrar, la lista se recarga desde la página 1: el orden
// lo decide el servidor, nunca se inserta localmente.
// ============================================================================

use std::rc::Rc;

use crate::error::ApiError;
use crate::services::resource::ListResource;
use crate::viewmodels::paginated_list::{FetchOutcome, PaginatedList};

pub struct ListPage<R: ListResource> {
    resource: Rc<R>,
    list: Rc<PaginatedList<R>>,
}

impl<R: ListResource> ListPage<R> {
    pub fn new(resource: R, page_size: u32) -> Self {
        let resource = Rc::new(resource);
        let list = Rc::new(PaginatedList::new(resource.clone(), page_size));
        Self { resource, list }
    }

    pub fn list(&self) -> &Rc<PaginatedList<R>> {
        &self.list
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R::Item, ApiError> {
        let created = self.resource.create(draft).await?;
        self.refresh().await;
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.resource.remove(id).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn load_more(&self) -> FetchOutcome {
        self.list.request_next_page().await
    }

    /// Filtra y carga la primera página. Sin cambio de término no hace nada
    /// (salvo que la lista siga vacía).
    pub async fn search(&self, term: &str) -> FetchOutcome {
        if self.list.set_search(term) || self.list.is_empty() {
            self.list.request_next_page().await
        } else {
            FetchOutcome::Skipped
        }
    }

    /// Reset y primera página
    pub async fn refresh(&self) -> FetchOutcome {
        self.list.reset();
        self.list.request_next_page().await
    }
}
