use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::recipe::entities::CalorieInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysis {
    pub identified_foods: Vec<String>,
    pub summary: String,
    pub calorie_info: CalorieInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion_size_assumption: Option<String>,
}
