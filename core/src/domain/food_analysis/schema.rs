use serde_json::json;

use crate::domain::recipe::schema::get_calorie_info_schema;

/// Returns the JSON schema for food analysis LLM responses
pub fn get_food_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "identifiedFoods": {
                "type": "array",
                "items": { "type": "string" }
            },
            "summary": { "type": "string" },
            "calorieInfo": get_calorie_info_schema(),
            "portionSizeAssumption": { "type": "string" }
        },
        "required": ["identifiedFoods", "summary", "calorieInfo"]
    })
}
