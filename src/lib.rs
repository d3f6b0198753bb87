// ============================================================================
// UZARO DASHBOARD - Núcleo cliente del dashboard de proyectos (RUST + WASM)
// ============================================================================
// Capas:
// - Services: SOLO comunicación API (transport + ApiClient + servicios)
// - Stores: sesión (fuente única de verdad de la autenticación)
// - ViewModels: listados paginados y páginas de alta/baja
// - State: State Management con RefCell + subscribers
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
mod test_support;

pub use app::Dashboard;
pub use config::{AppConfig, CONFIG};
pub use error::ApiError;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::app::Dashboard;
    use crate::config::CONFIG;
    use crate::error::ApiError;
    use crate::models::{Credentials, ProjectDraft, SupplierDraft};
    use crate::viewmodels::{near_end, DEFAULT_SCROLL_MARGIN};

    // Instancia global del dashboard
    thread_local! {
        static DASHBOARD: RefCell<Option<Rc<Dashboard>>> = RefCell::new(None);
    }

    fn dashboard() -> Result<Rc<Dashboard>, JsValue> {
        DASHBOARD
            .with(|cell| cell.borrow().clone())
            .ok_or_else(|| JsValue::from_str("Dashboard no inicializado"))
    }

    fn to_js(error: ApiError) -> JsValue {
        JsValue::from_str(&error.to_string())
    }

    /// Evento `dashboardChanged` en window: la vista vuelve a pedir `view_state()`
    fn notify_view() {
        let Some(window) = web_sys::window() else {
            return;
        };
        match web_sys::Event::new("dashboardChanged") {
            Ok(event) => {
                if let Err(e) = window.dispatch_event(&event) {
                    log::warn!("⚠️ No se pudo notificar a la vista: {:?}", e);
                }
            }
            Err(e) => log::warn!("⚠️ No se pudo crear el evento: {:?}", e),
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(Config::new(log::Level::Info));
        } else {
            log::set_max_level(log::LevelFilter::Off);
        }
        log::info!("🚀 Uzaro Dashboard ({})", CONFIG.environment);

        let dashboard = Rc::new(Dashboard::browser(&CONFIG));
        dashboard.subscribe(notify_view);
        DASHBOARD.with(|cell| {
            *cell.borrow_mut() = Some(dashboard.clone());
        });

        wasm_bindgen_futures::spawn_local(async move {
            let status = dashboard.start().await;
            log::info!("🔐 Estado de sesión inicial: {:?}", status);
        });
    }

    /// Devuelve el rol del usuario
    #[wasm_bindgen]
    pub async fn login(email: String, password: String) -> Result<JsValue, JsValue> {
        let dashboard = dashboard()?;
        let identity = dashboard
            .login(&Credentials::new(email, password))
            .await
            .map_err(to_js)?;
        Ok(JsValue::from_str(&identity.role))
    }

    #[wasm_bindgen]
    pub async fn logout() -> Result<(), JsValue> {
        dashboard()?.logout().await;
        Ok(())
    }

    /// JSON con sesión, listados y perfil
    #[wasm_bindgen]
    pub fn view_state() -> Result<String, JsValue> {
        serde_json::to_string(&dashboard()?.view_state()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub async fn load_more_projects() -> Result<(), JsValue> {
        dashboard()?.projects().load_more().await;
        Ok(())
    }

    #[wasm_bindgen]
    pub async fn load_more_suppliers() -> Result<(), JsValue> {
        dashboard()?.suppliers().load_more().await;
        Ok(())
    }

    #[wasm_bindgen]
    pub async fn search_projects(term: String) -> Result<(), JsValue> {
        dashboard()?.projects().search(&term).await;
        Ok(())
    }

    #[wasm_bindgen]
    pub async fn search_suppliers(term: String) -> Result<(), JsValue> {
        dashboard()?.suppliers().search(&term).await;
        Ok(())
    }

    /// Scroll del contenedor de un listado ("projects" | "suppliers")
    #[wasm_bindgen]
    pub fn on_list_scroll(list: String, scroll_top: f64, viewport_height: f64, scroll_height: f64) {
        if !near_end(scroll_top, viewport_height, scroll_height, DEFAULT_SCROLL_MARGIN) {
            return;
        }
        let Ok(dashboard) = dashboard() else {
            return;
        };

        wasm_bindgen_futures::spawn_local(async move {
            match list.as_str() {
                "projects" => {
                    dashboard.projects().load_more().await;
                }
                "suppliers" => {
                    dashboard.suppliers().load_more().await;
                }
                other => log::warn!("⚠️ Listado desconocido: {}", other),
            }
        });
    }

    /// Alta de proyecto con el usuario de la sesión como líder
    #[wasm_bindgen]
    pub async fn create_project(name: String, description: String, total_budget: f64) -> Result<JsValue, JsValue> {
        let dashboard = dashboard()?;
        let owner_id = dashboard
            .client()
            .current_user_id()
            .ok_or_else(|| JsValue::from_str("User ID not found in session"))?;

        let draft = ProjectDraft {
            name,
            description,
            total_budget,
            ..ProjectDraft::for_owner(owner_id)
        };
        let project = dashboard.projects().create(&draft).await.map_err(to_js)?;
        Ok(JsValue::from_str(&project.id))
    }

    /// Alta de proveedor con el usuario de la sesión como contacto
    #[wasm_bindgen]
    pub async fn create_supplier(name: String, address: String, logo: Option<String>) -> Result<JsValue, JsValue> {
        let dashboard = dashboard()?;
        let contact_id = dashboard
            .client()
            .current_user_id()
            .ok_or_else(|| JsValue::from_str("User ID not found in session"))?;

        let draft = SupplierDraft {
            name,
            address,
            logo,
            ..SupplierDraft::for_contact(contact_id)
        };
        let supplier = dashboard.suppliers().create(&draft).await.map_err(to_js)?;
        Ok(JsValue::from_str(&supplier.id))
    }

    /// Vuelve a pedir el perfil del usuario de la sesión
    #[wasm_bindgen]
    pub async fn reload_profile() -> Result<(), JsValue> {
        dashboard()?.profile().reload().await;
        Ok(())
    }

    /// JSON `{ data, pagination }` con las órdenes CAPEX/OPEX de un proveedor
    #[wasm_bindgen]
    pub async fn supplier_orders(supplier_id: String, page: u32, page_size: u32) -> Result<String, JsValue> {
        let orders = dashboard()?
            .capex()
            .search(&supplier_id, page.max(1), page_size.max(1))
            .await
            .map_err(to_js)?;
        serde_json::to_string(&orders).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub async fn delete_project(id: String) -> Result<(), JsValue> {
        dashboard()?.projects().delete(&id).await.map_err(to_js)
    }

    #[wasm_bindgen]
    pub async fn delete_supplier(id: String) -> Result<(), JsValue> {
        dashboard()?.suppliers().delete(&id).await.map_err(to_js)
    }
}
