// ============================================================================
// CAPEX SERVICE - Órdenes de compra (CAPEX / OPEX)
// ============================================================================

use serde_json::Value;

use crate::error::ApiError;
use crate::models::{Order, OrderDraft, OrderPage};
use crate::services::api_client::{ApiClient, QueryParams};
use crate::services::decode::{decode_items, decode_shape};
use crate::utils::endpoints::{capex, with_id};

#[derive(Clone)]
pub struct CapexService {
    client: ApiClient,
}

impl CapexService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, select: &[&str]) -> Result<Vec<Order>, ApiError> {
        let params = QueryParams::new().select(select);
        let value: Value = self.client.get(capex::GET_ALL, &params).await?;
        decode_items(value, "data", "orders")
    }

    pub async fn get(&self, id: &str, select: &[&str]) -> Result<Order, ApiError> {
        let params = QueryParams::new().select(select);
        let value: Value = self.client.get(&with_id(capex::GET_BY_ID, id), &params).await?;
        decode_shape(value, "order")
    }

    /// Devuelve la orden creada tal como la guarda el backend (sin forma garantizada)
    pub async fn create(&self, draft: &OrderDraft) -> Result<Value, ApiError> {
        let created: Value = self.client.post(capex::CREATE, &draft.to_create_request()).await?;
        log::info!("✅ Orden creada para proveedor {}", draft.supplier_id);
        Ok(created)
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&with_id(capex::REMOVE, id)).await?;
        Ok(())
    }

    /// Órdenes que coinciden con `term` (p.ej. id de proveedor), paginadas
    pub async fn search(&self, term: &str, page: u32, page_size: u32) -> Result<OrderPage, ApiError> {
        let params = QueryParams::new()
            .param("search", term)
            .param("page", page)
            .param("pageSize", page_size);
        let value: Value = self.client.get(capex::SEARCH, &params).await?;
        decode_shape(value, "orders")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{query_value, MockTransport};
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use serde_json::json;
    use std::rc::Rc;

    fn service(transport: &Rc<MockTransport>) -> CapexService {
        CapexService::new(ApiClient::new("http://api.test/api", transport.clone(), Rc::new(MemoryStorage::new())))
    }

    #[test]
    fn search_decodes_orders_and_total_pages() {
        let transport = MockTransport::new();
        transport.respond(200, json!({
            "data": [
                { "_id": "o1", "type": "CAPEX", "actualAmount": 120.0, "estimatedAmount": 100.0 },
                { "_id": "o2", "type": "OPEX" }
            ],
            "pagination": { "totalPages": 4 }
        }));

        let page = block_on(service(&transport).search("s1", 2, 5)).unwrap();

        assert_eq!(page.pagination.total_pages, 4);
        assert!(page.data[0].is_capex());
        assert_eq!(page.data[0].variance(), 20.0);
        assert!(!page.data[1].is_capex());

        let url = &transport.requests()[0].url;
        assert!(url.starts_with("http://api.test/api/capex/search?"));
        assert_eq!(query_value(url, "search").as_deref(), Some("s1"));
        assert_eq!(query_value(url, "pageSize").as_deref(), Some("5"));
    }

    #[test]
    fn remove_uses_delete_route() {
        let transport = MockTransport::new();
        transport.respond(200, json!({ "message": "deleted" }));

        block_on(service(&transport).remove("o1")).unwrap();

        assert_eq!(transport.requests()[0].url, "http://api.test/api/capex/delete/o1");
    }
}
