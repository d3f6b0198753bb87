// ============================================================================
// PAGINATED LIST - Controlador de scroll infinito
// ============================================================================
// Un solo fetch en vuelo por lista (guard `is_fetching`). `reset` sube la
// época: la respuesta de un fetch anterior al reset se descarta al llegar.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::resource::{ListResource, PageRequest};
use crate::state::{PageState, ReactiveState};

/// Resultado de una llamada a [`PaginatedList::request_next_page`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Guard cerrado (fetch en vuelo o sin más páginas): no se envió nada
    Skipped,
    Loaded { added: usize },
    /// La lista se reinició con la request en vuelo
    Discarded,
    Failed(String),
}

pub struct PaginatedList<R: ListResource> {
    resource: Rc<R>,
    page_size: u32,
    dedup: bool,
    search: RefCell<Option<String>>,
    state: ReactiveState<PageState<R::Item>>,
}

impl<R: ListResource> PaginatedList<R> {
    pub fn new(resource: Rc<R>, page_size: u32) -> Self {
        Self {
            resource,
            page_size: page_size.max(1),
            dedup: false,
            search: RefCell::new(None),
            state: ReactiveState::new(PageState::new()),
        }
    }

    /// Descartar items cuyo id ya está en la lista
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search_term(&self) -> Option<String> {
        self.search.borrow().clone()
    }

    pub fn snapshot(&self) -> PageState<R::Item> {
        self.state.get()
    }

    pub fn items(&self) -> Vec<R::Item> {
        self.state.with(|state| state.items.clone())
    }

    pub fn len(&self) -> usize {
        self.state.with(|state| state.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_fetching(&self) -> bool {
        self.state.with(|state| state.is_fetching)
    }

    pub fn has_more(&self) -> bool {
        self.state.with(|state| state.has_more)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|state| state.error.clone())
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback);
    }

    /// Pide la página `current_page`, salvo que haya un fetch en vuelo o no queden páginas
    pub async fn request_next_page(&self) -> FetchOutcome {
        if !self.state.with(PageState::can_fetch) {
            return FetchOutcome::Skipped;
        }

        let (page, epoch) = self.state.update(|state| {
            state.is_fetching = true;
            state.error = None;
            (state.current_page, state.epoch)
        });

        let request = PageRequest {
            page,
            page_size: self.page_size,
            search: self.search_term(),
        };
        let result = self.resource.fetch_page(request).await;

        if self.state.with(|state| state.epoch != epoch) {
            log::info!("⏭️ Página {} de {} descartada (lista reiniciada)", page, self.resource.name());
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(batch) => {
                let received = batch.items.len();
                let has_more = match batch.total_pages {
                    Some(total_pages) => page < total_pages,
                    None => received >= self.page_size as usize,
                };
                let dedup = self.dedup;

                let added = self.state.update(|state| {
                    let added = state.append(batch.items, dedup);
                    state.has_more = has_more;
                    state.current_page = page + 1;
                    state.is_fetching = false;
                    added
                });

                log::info!("📄 {} página {}: {} items", self.resource.name(), page, added);
                FetchOutcome::Loaded { added }
            }
            Err(e) => {
                let message = e.user_message(self.resource.name());
                log::warn!("⚠️ {} página {} falló: {}", self.resource.name(), page, e);
                self.state.update(|state| {
                    state.error = Some(message.clone());
                    state.is_fetching = false;
                });
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Vuelve a la página 1 sin items
    pub fn reset(&self) {
        self.state.update(PageState::reset);
    }

    /// Cambia el filtro de búsqueda. Devuelve `true` (y reinicia) si cambió.
    pub fn set_search(&self, term: &str) -> bool {
        let term = term.trim();
        let term = (!term.is_empty()).then(|| term.to_string());

        if *self.search.borrow() == term {
            return false;
        }
        *self.search.borrow_mut() = term;
        self.reset();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::resource::{ProjectsResource, SuppliersResource};
    use crate::services::{ApiClient, ProjectService, SupplierService};
    use crate::test_support::{json_response, query_value, MockTransport};
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    fn api(transport: &Rc<MockTransport>) -> ApiClient {
        ApiClient::new("http://api.test/api", transport.clone(), Rc::new(MemoryStorage::new()))
    }

    fn suppliers(transport: &Rc<MockTransport>) -> PaginatedList<SuppliersResource> {
        let resource = SuppliersResource::new(SupplierService::new(api(transport)));
        PaginatedList::new(Rc::new(resource), 10)
    }

    fn projects(transport: &Rc<MockTransport>, page_size: u32) -> PaginatedList<ProjectsResource> {
        let resource = ProjectsResource::new(ProjectService::new(api(transport)), || Some("u1".to_string()));
        PaginatedList::new(Rc::new(resource), page_size)
    }

    fn supplier_page(ids: &[&str], total_pages: u32) -> Value {
        let suppliers: Vec<Value> = ids.iter().map(|id| json!({ "_id": id, "name": id })).collect();
        json!({ "suppliers": suppliers, "totalPages": total_pages })
    }

    fn project_page(ids: &[&str]) -> Value {
        let projects: Vec<Value> = ids.iter().map(|id| json!({ "_id": id })).collect();
        json!({ "projects": projects })
    }

    #[test]
    fn concurrent_requests_issue_one_call() {
        let transport = MockTransport::new();
        let pending = transport.defer();
        let list = suppliers(&transport);

        let (first, second, third) = block_on(async {
            futures::join!(list.request_next_page(), list.request_next_page(), async {
                let outcome = list.request_next_page().await;
                let _ = pending.send(json_response(200, supplier_page(&["a", "b"], 2)));
                outcome
            })
        });

        assert_eq!(first, FetchOutcome::Loaded { added: 2 });
        assert_eq!(second, FetchOutcome::Skipped);
        assert_eq!(third, FetchOutcome::Skipped);
        assert_eq!(transport.request_count(), 1);
        assert!(!list.is_fetching());
    }

    #[test]
    fn stops_after_total_pages() {
        let transport = MockTransport::new();
        let list = suppliers(&transport);
        transport.respond(200, supplier_page(&["a"], 3));
        transport.respond(200, supplier_page(&["b"], 3));
        transport.respond(200, supplier_page(&["c"], 3));

        for _ in 0..3 {
            assert!(matches!(block_on(list.request_next_page()), FetchOutcome::Loaded { .. }));
        }
        assert!(!list.has_more());

        assert_eq!(block_on(list.request_next_page()), FetchOutcome::Skipped);
        assert_eq!(transport.request_count(), 3);

        let pages: Vec<Option<String>> = transport
            .requests()
            .iter()
            .map(|request| query_value(&request.url, "page"))
            .collect();
        assert_eq!(pages, vec![Some("1".into()), Some("2".into()), Some("3".into())]);
        assert_eq!(query_value(&transport.requests()[0].url, "limit").as_deref(), Some("10"));
        assert_eq!(list.items().len(), 3);
    }

    #[test]
    fn without_total_a_short_batch_ends_the_list() {
        let transport = MockTransport::new();
        let list = projects(&transport, 2);
        transport.respond(200, project_page(&["p1", "p2"]));
        transport.respond(200, project_page(&["p3"]));

        block_on(list.request_next_page());
        assert!(list.has_more());
        block_on(list.request_next_page());
        assert!(!list.has_more());

        let url = &transport.requests()[1].url;
        assert!(url.starts_with("http://api.test/api/project/get/byUser/u1?populate=projectLeader"));
        assert_eq!(query_value(url, "pageSize").as_deref(), Some("2"));
        assert_eq!(query_value(url, "page").as_deref(), Some("2"));
    }

    #[test]
    fn reset_returns_to_first_page() {
        let transport = MockTransport::new();
        let list = suppliers(&transport);
        transport.respond(200, supplier_page(&["a", "b"], 1));
        block_on(list.request_next_page());
        assert!(!list.has_more());

        list.reset();

        let state = list.snapshot();
        assert!(state.items.is_empty());
        assert_eq!(state.current_page, 1);
        assert!(state.has_more);
        assert_eq!(state.error, None);
    }

    #[test]
    fn response_after_reset_is_discarded() {
        let transport = MockTransport::new();
        let pending = transport.defer();
        transport.respond(200, supplier_page(&["fresh"], 1));
        let list = suppliers(&transport);

        let (stale, fresh) = block_on(async {
            futures::join!(list.request_next_page(), async {
                list.reset();
                let fresh = list.request_next_page().await;
                let _ = pending.send(json_response(200, supplier_page(&["old"], 5)));
                fresh
            })
        });

        assert_eq!(stale, FetchOutcome::Discarded);
        assert_eq!(fresh, FetchOutcome::Loaded { added: 1 });
        let ids: Vec<String> = list.items().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["fresh".to_string()]);
        assert!(!list.has_more());
        assert!(!list.is_fetching());
    }

    #[test]
    fn failure_keeps_cursor_for_retry() {
        let transport = MockTransport::new();
        let list = suppliers(&transport);
        transport.respond(200, supplier_page(&["a"], 3));
        transport.fail_network("offline");
        transport.respond(200, supplier_page(&["b"], 3));

        block_on(list.request_next_page());
        let failed = block_on(list.request_next_page());

        assert_eq!(
            failed,
            FetchOutcome::Failed("Failed to fetch suppliers. Please try again later.".to_string())
        );
        let state = list.snapshot();
        assert_eq!(state.current_page, 2);
        assert!(state.has_more);
        assert!(!state.is_fetching);
        assert!(state.error.is_some());

        block_on(list.request_next_page());
        assert_eq!(query_value(&transport.requests()[2].url, "page").as_deref(), Some("2"));
        assert_eq!(list.error(), None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn invalid_shape_surfaces_validation_message() {
        let transport = MockTransport::new();
        let list = projects(&transport, 9);
        transport.respond(200, json!({ "projects": "nope" }));

        let outcome = block_on(list.request_next_page());

        assert_eq!(
            outcome,
            FetchOutcome::Failed("Failed to fetch projects. Invalid response format.".to_string())
        );
    }

    #[test]
    fn missing_user_id_fails_without_request() {
        let transport = MockTransport::new();
        let resource = ProjectsResource::new(ProjectService::new(api(&transport)), || None);
        let list = PaginatedList::new(Rc::new(resource), 9);

        let outcome = block_on(list.request_next_page());

        assert_eq!(outcome, FetchOutcome::Failed("User ID not found in session".to_string()));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn dedup_is_opt_in() {
        let transport = MockTransport::new();
        transport.respond(200, supplier_page(&["a", "b"], 2));
        transport.respond(200, supplier_page(&["b", "c"], 2));
        let list = suppliers(&transport).with_dedup(true);

        block_on(list.request_next_page());
        let outcome = block_on(list.request_next_page());

        assert_eq!(outcome, FetchOutcome::Loaded { added: 1 });
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn search_term_resets_and_is_forwarded() {
        let transport = MockTransport::new();
        transport.respond(200, supplier_page(&["a"], 2));
        transport.respond(200, supplier_page(&["acme"], 1));
        let list = suppliers(&transport);
        block_on(list.request_next_page());

        assert!(list.set_search("  acme "));
        assert!(list.is_empty());
        assert!(!list.set_search("acme"));
        block_on(list.request_next_page());

        let url = &transport.requests()[1].url;
        assert_eq!(query_value(url, "search").as_deref(), Some("acme"));
        assert_eq!(query_value(url, "page").as_deref(), Some("1"));

        assert!(list.set_search(""));
        assert_eq!(list.search_term(), None);
    }
}
