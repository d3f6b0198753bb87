use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::user::UserRef;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum ProjectStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ProjectStatusEntry {
    pub status: ProjectStatus,
    pub date: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub user_id: String,
    pub role: String,
}

/// Proyecto persistido (con `_id`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_start_date: Option<String>,
    #[serde(default)]
    pub estimated_end_date: Option<String>,
    #[serde(default)]
    pub actual_start_date: Option<String>,
    #[serde(default)]
    pub actual_end_date: Option<String>,
    #[serde(default)]
    pub total_budget: f64,
    #[serde(default)]
    pub forecasted_budget: f64,
    #[serde(default)]
    pub project_status: Vec<ProjectStatusEntry>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub project_leader: Option<UserRef>,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
}

impl Project {
    /// Último estado registrado
    pub fn current_status(&self) -> Option<ProjectStatus> {
        self.project_status.last().map(|entry| entry.status)
    }
}

impl Entity for Project {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// Proyecto en edición (formulario), todavía sin `_id`
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub estimated_start_date: Option<String>,
    pub estimated_end_date: Option<String>,
    pub total_budget: f64,
    pub forecasted_budget: f64,
    pub tags: Vec<String>,
    /// Usuario que crea el proyecto: líder y primer miembro "administrator"
    pub owner_id: String,
}

impl ProjectDraft {
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            ..Self::default()
        }
    }

    pub fn to_create_request(&self) -> CreateProjectRequest {
        CreateProjectRequest {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            estimated_start_date: self.estimated_start_date.clone(),
            estimated_end_date: self.estimated_end_date.clone(),
            total_budget: self.total_budget,
            forecasted_budget: self.forecasted_budget,
            project_status: vec![ProjectStatusEntry {
                status: ProjectStatus::Pending,
                date: Utc::now().to_rfc3339(),
            }],
            project_leader: self.owner_id.clone(),
            tags: self.tags.clone(),
            members: vec![ProjectMember {
                user_id: self.owner_id.clone(),
                role: "administrator".to_string(),
            }],
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_end_date: Option<String>,
    pub total_budget: f64,
    pub forecasted_budget: f64,
    pub project_status: Vec<ProjectStatusEntry>,
    pub project_leader: String,
    pub tags: Vec<String>,
    pub members: Vec<ProjectMember>,
}
