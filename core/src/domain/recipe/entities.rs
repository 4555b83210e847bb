use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    pub is_provided: bool,
}

/// Estimated calories and macros, as free-form strings (e.g. "450 kcal", "12g").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalorieInfo {
    pub total_calories: String,
    pub protein: String,
    pub carbohydrates: String,
    pub fat: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calorie_info: Option<CalorieInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_saved: bool,
}

impl Recipe {
    /// Ingredients the cook still has to buy.
    pub fn missing_ingredients(&self) -> Vec<&Ingredient> {
        self.ingredients.iter().filter(|i| !i.is_provided).collect()
    }

    pub fn mark_saved(&mut self, record_id: String) {
        self.is_saved = true;
        self.id = Some(record_id);
    }

    pub fn clear_saved(&mut self) {
        self.is_saved = false;
        self.id = None;
    }

    /// Copy suitable for persisting: no saved flag, no record id.
    pub fn without_ui_state(&self) -> Recipe {
        let mut recipe = self.clone();
        recipe.clear_saved();
        recipe
    }

    pub fn to_share_text(&self) -> String {
        let ingredients = self
            .ingredients
            .iter()
            .map(|i| format!("- {} {}", i.quantity, i.name))
            .collect::<Vec<_>>()
            .join("\n");
        let instructions = self
            .instructions
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Recipe: {}\n\nDescription:\n{}\n\nPrep Time: {} | Cook Time: {} | Servings: {}\n\nIngredients:\n{}\n\nInstructions:\n{}",
            self.name,
            self.description,
            self.prep_time,
            self.cook_time,
            self.servings,
            ingredients,
            instructions
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn recipe(name: &str) -> Recipe {
        Recipe {
            name: name.to_string(),
            description: format!("A simple {}", name),
            prep_time: "10 minutes".to_string(),
            cook_time: "20 minutes".to_string(),
            servings: "2 servings".to_string(),
            ingredients: vec![
                Ingredient {
                    name: "flour".to_string(),
                    quantity: "1 cup".to_string(),
                    is_provided: true,
                },
                Ingredient {
                    name: "butter".to_string(),
                    quantity: "2 tbsp".to_string(),
                    is_provided: false,
                },
            ],
            instructions: vec!["Mix".to_string(), "Bake".to_string()],
            image_url: None,
            calorie_info: None,
            id: None,
            is_saved: false,
        }
    }
}
