use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::user::UserRef;

/// Proveedor persistido
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub contact_person: Vec<UserRef>,
}

impl Entity for Supplier {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// Respuesta paginada de `GET /supplier/get/all`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPage {
    pub suppliers: Vec<Supplier>,
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: Option<u32>,
}

/// Proveedor en el formulario de alta
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SupplierDraft {
    pub name: String,
    pub address: String,
    pub logo: Option<String>,
    pub contact_person_ids: Vec<String>,
}

impl SupplierDraft {
    /// Borrador con el usuario actual como persona de contacto
    pub fn for_contact(user_id: impl Into<String>) -> Self {
        Self {
            contact_person_ids: vec![user_id.into()],
            ..Self::default()
        }
    }

    pub fn to_create_request(&self) -> CreateSupplierRequest {
        CreateSupplierRequest {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            logo: self.logo.clone().unwrap_or_default(),
            contact_person: self
                .contact_person_ids
                .iter()
                .filter(|id| !id.is_empty())
                .map(|id| ContactRef { id: id.clone() })
                .collect(),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierRequest {
    pub name: String,
    pub address: String,
    pub logo: String,
    pub contact_person: Vec<ContactRef>,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct ContactRef {
    #[serde(rename = "_id")]
    pub id: String,
}
