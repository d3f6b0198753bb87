// ============================================================================
// SUPPLIER SERVICE - Endpoints de proveedores
// ============================================================================

use serde_json::Value;

use crate::error::ApiError;
use crate::models::{Supplier, SupplierDraft, SupplierPage};
use crate::services::api_client::{ApiClient, QueryParams};
use crate::services::decode::{decode_created, decode_items, decode_shape};
use crate::utils::endpoints::{supplier, with_id};
use crate::utils::{SUPPLIER_LIST_POPULATE, SUPPLIER_LIST_SELECT, SUPPLIER_LIST_SORT};

/// Parámetros del listado paginado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl SupplierQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self { page, limit, search: None }
    }

    fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .select(SUPPLIER_LIST_SELECT)
            .param("sort", SUPPLIER_LIST_SORT)
            .param("populate", SUPPLIER_LIST_POPULATE)
            .param("page", self.page)
            .param("limit", self.limit)
            .param_opt("search", self.search.as_deref())
    }
}

#[derive(Clone)]
pub struct SupplierService {
    client: ApiClient,
}

impl SupplierService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `{ suppliers, totalPages, currentPage }`
    pub async fn list(&self, query: &SupplierQuery) -> Result<SupplierPage, ApiError> {
        let value: Value = self.client.get(supplier::GET_ALL, &query.to_params()).await?;
        decode_shape(value, "suppliers")
    }

    pub async fn get(&self, id: &str, select: &[&str]) -> Result<Supplier, ApiError> {
        let params = QueryParams::new()
            .select(select)
            .param("populate", SUPPLIER_LIST_POPULATE);
        let value: Value = self.client.get(&with_id(supplier::GET_BY_ID, id), &params).await?;
        decode_shape(value, "supplier")
    }

    /// La respuesta debe traer `{ supplier: { _id, ... } }`
    pub async fn create(&self, draft: &SupplierDraft) -> Result<Supplier, ApiError> {
        let value: Value = self.client.post(supplier::CREATE, &draft.to_create_request()).await?;
        let created: Supplier = decode_created(value, "supplier", "supplier")?;
        log::info!("✅ Proveedor creado: {}", created.id);
        Ok(created)
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&with_id(supplier::REMOVE, id)).await?;
        log::info!("🗑️ Proveedor eliminado: {}", id);
        Ok(())
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Supplier>, ApiError> {
        let params = QueryParams::new().param("search", term);
        let value: Value = self.client.get(supplier::SEARCH, &params).await?;
        decode_items(value, "suppliers", "suppliers")
    }
}
