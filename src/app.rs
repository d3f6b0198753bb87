// ============================================================================
// APP - Raíz de composición del dashboard
// ============================================================================
// Un solo ApiClient y un solo SessionStorage compartidos por la sesión y los
// listados. Tras un bootstrap o login correctos se carga la página 1 de cada
// listado y el perfil del usuario; el logout los vacía.
// ============================================================================

use std::rc::Rc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{Credentials, Identity};
use crate::services::{
    ApiClient, AuthService, CapexService, HttpTransport, ListResource, ProjectService,
    ProjectsResource, SupplierService, SuppliersResource, UserService,
};
use crate::state::AuthStatus;
use crate::stores::SessionStore;
use crate::utils::SessionStorage;
use crate::viewmodels::{ListPage, PaginatedList, ProfileLoader};

pub struct Dashboard {
    client: ApiClient,
    session: Rc<SessionStore>,
    projects: ListPage<ProjectsResource>,
    suppliers: ListPage<SuppliersResource>,
    profile: ProfileLoader,
}

impl Dashboard {
    pub fn new(config: &AppConfig, transport: Rc<dyn HttpTransport>, storage: Rc<dyn SessionStorage>) -> Self {
        let client = ApiClient::new(config.backend_url(), transport, storage.clone());

        let session = Rc::new(SessionStore::new(
            storage,
            AuthService::new(client.clone()),
            config.session_expiry_days,
        ));

        let session_client = client.clone();
        let projects = ListPage::new(
            ProjectsResource::new(ProjectService::new(client.clone()), move || {
                session_client.current_user_id()
            }),
            config.pagination.projects_page_size,
        );
        let suppliers = ListPage::new(
            SuppliersResource::new(SupplierService::new(client.clone())),
            config.pagination.suppliers_page_size,
        );

        let profile = ProfileLoader::new(UserService::new(client.clone()));

        log::info!("🧭 Dashboard listo contra {}", client.base_url());

        Self {
            client,
            session,
            projects,
            suppliers,
            profile,
        }
    }

    /// Navegador: fetch + localStorage
    #[cfg(target_arch = "wasm32")]
    pub fn browser(config: &AppConfig) -> Self {
        use crate::services::GlooTransport;
        use crate::utils::BrowserStorage;

        Self::new(config, Rc::new(GlooTransport), Rc::new(BrowserStorage))
    }

    /// Nativo: reqwest + sesión en memoria
    #[cfg(not(target_arch = "wasm32"))]
    pub fn native(config: &AppConfig) -> Result<Self, ApiError> {
        use crate::services::ReqwestTransport;
        use crate::utils::MemoryStorage;
        use std::time::Duration;

        let transport = ReqwestTransport::new(Duration::from_secs(config.network_timeout_seconds))?;
        Ok(Self::new(config, Rc::new(transport), Rc::new(MemoryStorage::new())))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &Rc<SessionStore> {
        &self.session
    }

    pub fn projects(&self) -> &ListPage<ProjectsResource> {
        &self.projects
    }

    pub fn suppliers(&self) -> &ListPage<SuppliersResource> {
        &self.suppliers
    }

    pub fn profile(&self) -> &ProfileLoader {
        &self.profile
    }

    pub fn capex(&self) -> CapexService {
        CapexService::new(self.client.clone())
    }

    /// Mismo callback para sesión y listados
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback = Rc::new(callback);
        let on_session = callback.clone();
        self.session.subscribe(move || on_session());
        let on_projects = callback.clone();
        self.projects.list().subscribe(move || on_projects());
        let on_suppliers = callback.clone();
        self.suppliers.list().subscribe(move || on_suppliers());
        self.profile.subscribe(move || callback());
    }

    /// Valida la sesión persistida y, si es válida, carga los listados
    pub async fn start(&self) -> AuthStatus {
        log::info!("🚀 Iniciando dashboard...");
        let status = self.session.bootstrap().await;
        if status.is_authenticated() {
            self.reload_lists().await;
            self.profile.load().await;
        }
        status
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, ApiError> {
        let identity = self.session.login(credentials).await?;
        self.profile.reset();
        self.reload_lists().await;
        self.profile.load().await;
        Ok(identity)
    }

    pub async fn logout(&self) {
        self.session.logout().await;
        self.projects.list().reset();
        self.suppliers.list().reset();
        self.profile.reset();
    }

    /// Estado serializable para la vista
    pub fn view_state(&self) -> Value {
        json!({
            "session": self.session.session(),
            "projects": list_view(self.projects.list()),
            "suppliers": list_view(self.suppliers.list()),
            "profile": self.profile.snapshot(),
        })
    }

    async fn reload_lists(&self) {
        self.projects.refresh().await;
        self.suppliers.refresh().await;
    }
}

fn list_view<R>(list: &PaginatedList<R>) -> Value
where
    R: ListResource,
    R::Item: Serialize,
{
    let state = list.snapshot();
    json!({
        "items": state.items,
        "currentPage": state.current_page,
        "hasMore": state.has_more,
        "isFetching": state.is_fetching,
        "error": state.error,
    })
}
