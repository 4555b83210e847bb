use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub estimated_cost: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub category_name: String,
    pub estimated_cost: String,
    pub items: Vec<MenuItem>,
}

/// Costs are the model's own estimates, kept verbatim. Category costs are not
/// expected to add up to `estimated_cost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuPlan {
    pub plan_title: String,
    pub summary: String,
    pub estimated_cost: String,
    pub categories: Vec<MenuCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_of_action: Vec<String>,
}
