use serde_json::json;

/// JSON schema for the calorie breakdown shared by recipes and food analysis.
pub fn get_calorie_info_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "totalCalories": { "type": "string", "description": "Total estimated calories, e.g. \"450 kcal\"." },
            "protein": { "type": "string", "description": "Estimated protein, e.g. \"20g\"." },
            "carbohydrates": { "type": "string", "description": "Estimated carbohydrates, e.g. \"55g\"." },
            "fat": { "type": "string", "description": "Estimated fat, e.g. \"15g\"." }
        },
        "required": ["totalCalories", "protein", "carbohydrates", "fat"]
    })
}

/// Returns the JSON schema for a single recipe LLM response
pub fn get_recipe_schema(include_nutrition: bool) -> serde_json::Value {
    let mut schema = json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "The title of the recipe." },
            "description": { "type": "string", "description": "A short, enticing description of the dish." },
            "prepTime": { "type": "string", "description": "Preparation time, e.g. \"15 minutes\"." },
            "cookTime": { "type": "string", "description": "Cooking time, e.g. \"25 minutes\"." },
            "servings": { "type": "string", "description": "Number of servings, e.g. \"4 servings\"." },
            "ingredients": {
                "type": "array",
                "description": "All ingredients required for the recipe.",
                "items": {
                    "type": "object",
                    "properties": {
                        "quantity": { "type": "string", "description": "Quantity and unit, e.g. \"1 cup\"." },
                        "name": { "type": "string", "description": "Name of the ingredient." },
                        "isProvided": { "type": "boolean", "description": "True if this ingredient was in the user-provided list." }
                    },
                    "required": ["quantity", "name", "isProvided"]
                }
            },
            "instructions": {
                "type": "array",
                "description": "Step-by-step cooking instructions.",
                "items": { "type": "string" }
            }
        },
        "required": [
            "name", "description", "prepTime", "cookTime",
            "servings", "ingredients", "instructions"
        ]
    });

    if include_nutrition {
        schema["properties"]["calorieInfo"] = get_calorie_info_schema();
        if let Some(required) = schema["required"].as_array_mut() {
            required.push(json!("calorieInfo"));
        }
    }

    schema
}

/// Returns the JSON schema for a list of recipes
pub fn get_recipe_list_schema(include_nutrition: bool) -> serde_json::Value {
    json!({
        "type": "array",
        "items": get_recipe_schema(include_nutrition)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nutrition_field_only_when_requested() {
        let plain = get_recipe_schema(false);
        assert!(plain["properties"].get("calorieInfo").is_none());

        let rich = get_recipe_schema(true);
        assert!(rich["properties"].get("calorieInfo").is_some());
        assert!(
            rich["required"]
                .as_array()
                .unwrap()
                .contains(&json!("calorieInfo"))
        );
    }
}
