// ============================================================================
// PROJECT SERVICE - Endpoints de proyectos
// ============================================================================

use serde_json::Value;

use crate::error::ApiError;
use crate::models::{Project, ProjectDraft};
use crate::services::api_client::{ApiClient, QueryParams};
use crate::services::decode::{decode_created, decode_items, decode_shape};
use crate::utils::endpoints::{project, with_id};

#[derive(Clone)]
pub struct ProjectService {
    client: ApiClient,
}

impl ProjectService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Proyectos del usuario, una página: `{ projects: [...] }` (sin total de páginas)
    pub async fn list_by_user(
        &self,
        user_id: &str,
        page: u32,
        page_size: u32,
        query: Option<&str>,
    ) -> Result<Vec<Project>, ApiError> {
        let path = format!("{}?populate=projectLeader", with_id(project::GET_BY_USER, user_id));
        let params = QueryParams::new()
            .param("page", page)
            .param("pageSize", page_size)
            .param_opt("query", query);

        let value: Value = self.client.get(&path, &params).await?;
        decode_items(value, "projects", "projects")
    }

    pub async fn get(&self, id: &str, select: &[&str]) -> Result<Project, ApiError> {
        let params = QueryParams::new().select(select);
        let value: Value = self.client.get(&with_id(project::GET_BY_ID, id), &params).await?;
        decode_shape(value, "project")
    }

    /// Crea el proyecto; la respuesta debe traer `{ project: { _id, ... } }`
    pub async fn create(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let value: Value = self.client.post(project::CREATE, &draft.to_create_request()).await?;
        let created: Project = decode_created(value, "project", "project")?;
        log::info!("✅ Proyecto creado: {}", created.id);
        Ok(created)
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&with_id(project::REMOVE, id)).await?;
        log::info!("🗑️ Proyecto eliminado: {}", id);
        Ok(())
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Project>, ApiError> {
        let params = QueryParams::new().param("search", term);
        let value: Value = self.client.get(project::SEARCH, &params).await?;
        decode_items(value, "projects", "projects")
    }

    /// Datos agregados del dashboard de un proyecto (consumidos tal cual por los gráficos)
    pub async fn dashboard(&self, project_name: &str) -> Result<Value, ApiError> {
        self.client
            .get(&with_id(project::DASHBOARD, project_name), &QueryParams::new())
            .await
    }
}
