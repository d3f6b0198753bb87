use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Orden de compra / entrada CAPEX-OPEX
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub actual_amount: f64,
    #[serde(default)]
    pub estimated_amount: f64,
    #[serde(rename = "type", default)]
    pub expense_type: String,
}

impl Order {
    pub fn is_capex(&self) -> bool {
        self.expense_type.eq_ignore_ascii_case("capex")
    }

    /// Gasto real menos estimado (positivo = por encima del presupuesto)
    pub fn variance(&self) -> f64 {
        self.actual_amount - self.estimated_amount
    }
}

impl Entity for Order {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// `{ data: Order[], pagination: { totalPages } }` de `GET /capex/search`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct OrderPage {
    #[serde(default)]
    pub data: Vec<Order>,
    pub pagination: OrderPagination,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderPagination {
    pub total_pages: u32,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct OrderDraft {
    pub expense_type: String,
    pub description: String,
    pub supplier_id: String,
    pub project_id: Option<String>,
    pub date: String,
    pub estimated_amount: f64,
    pub actual_amount: f64,
}

impl OrderDraft {
    pub fn for_supplier(supplier_id: impl Into<String>) -> Self {
        Self {
            supplier_id: supplier_id.into(),
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    pub fn to_create_request(&self) -> CreateOrderRequest {
        CreateOrderRequest {
            expense_type: self.expense_type.trim().to_string(),
            description: self.description.trim().to_string(),
            supplier_id: self.supplier_id.clone(),
            project_id: self.project_id.clone().filter(|id| !id.is_empty()),
            date: self.date.clone(),
            estimated_amount: self.estimated_amount,
            actual_amount: self.actual_amount,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(rename = "type")]
    pub expense_type: String,
    pub description: String,
    pub supplier_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub date: String,
    pub estimated_amount: f64,
    pub actual_amount: f64,
}
