use serde::{Deserialize, Serialize};

use crate::domain::{
    kitchen::value_objects::{Mode, RecipeFinderMode},
    menu::value_objects::{FoodStyle, LocationType},
    recipe::value_objects::{Diet, MaxCookTime, Occasion, RecipeFilters},
};

/// Everything needed to replay a generation, keyed by the mode that ran it.
///
/// Stored as a flat JSON object with a `mode` discriminator; unknown keys are
/// ignored and missing optional keys take form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum HistoryParams {
    #[serde(rename_all = "camelCase")]
    Recipe {
        #[serde(default)]
        recipe_finder_mode: RecipeFinderMode,
        #[serde(default)]
        ingredients: Vec<String>,
        #[serde(default)]
        recipe_query: String,
        #[serde(flatten)]
        filters: RecipeFilters,
    },
    #[serde(rename_all = "camelCase")]
    Tiffin {
        #[serde(default)]
        max_cook_time: MaxCookTime,
        #[serde(default)]
        occasion: Occasion,
        #[serde(default)]
        ingredients: Vec<String>,
        #[serde(flatten)]
        filters: RecipeFilters,
    },
    #[serde(rename_all = "camelCase")]
    Menu {
        event_type: String,
        guest_count: u32,
        budget: f64,
        #[serde(default)]
        country: String,
        #[serde(default)]
        location_type: LocationType,
        #[serde(default)]
        food_style: FoodStyle,
        #[serde(default)]
        cuisine: Option<String>,
        #[serde(default)]
        diet: Diet,
    },
    #[serde(rename_all = "camelCase")]
    Rescue {
        rescue_dish_name: String,
        rescue_problem: String,
    },
    #[serde(rename_all = "camelCase")]
    Vision {
        #[serde(default)]
        vision_user_context: String,
    },
}

impl HistoryParams {
    pub fn mode(&self) -> Mode {
        match self {
            HistoryParams::Recipe { .. } => Mode::Recipe,
            HistoryParams::Tiffin { .. } => Mode::Tiffin,
            HistoryParams::Menu { .. } => Mode::Menu,
            HistoryParams::Rescue { .. } => Mode::Rescue,
            HistoryParams::Vision { .. } => Mode::Vision,
        }
    }

    /// Decodes a stored parameter bag. The `mode` column is authoritative and
    /// replaces any `mode` key inside the bag.
    pub fn from_stored(mode: &str, mut params: serde_json::Value) -> Result<Self, serde_json::Error> {
        if let Some(object) = params.as_object_mut() {
            object.insert(
                "mode".to_string(),
                serde_json::Value::String(mode.to_string()),
            );
        }
        serde_json::from_value(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::value_objects::{Preference, SkillLevel};
    use serde_json::json;

    #[test]
    fn test_decodes_flat_recipe_bag() {
        let params: HistoryParams = serde_json::from_value(json!({
            "mode": "recipe",
            "recipeFinderMode": "ingredient",
            "ingredients": ["flour", "water"],
            "cuisine": "",
            "diet": "Vegetarian",
            "servings": 4,
            "preferences": ["Spicy"],
            "allergies": "peanuts",
            "cookLevel": "Expert",
            "cookAge": "Major",
            "mealType": "Any",
            "showCalories": true
        }))
        .unwrap();

        let HistoryParams::Recipe {
            recipe_finder_mode,
            ingredients,
            filters,
            ..
        } = params
        else {
            panic!("expected recipe params");
        };

        assert_eq!(recipe_finder_mode, RecipeFinderMode::Ingredient);
        assert_eq!(ingredients, vec!["flour", "water"]);
        assert_eq!(filters.servings, 4);
        assert_eq!(filters.skill_level, SkillLevel::Expert);
        assert!(filters.include_nutrition);
        assert!(filters.preferences.contains(&Preference::Spicy));
    }

    #[test]
    fn test_serializes_flat_with_mode_tag() {
        let params = HistoryParams::Rescue {
            rescue_dish_name: "Biryani".to_string(),
            rescue_problem: "Rice is mushy".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "mode": "rescue",
                "rescueDishName": "Biryani",
                "rescueProblem": "Rice is mushy"
            })
        );
    }

    #[test]
    fn test_from_stored_uses_column_mode() {
        let params =
            HistoryParams::from_stored("vision", json!({ "visionUserContext": "half plate" }))
                .unwrap();
        assert_eq!(params.mode(), Mode::Vision);
    }

    #[test]
    fn test_column_mode_overrides_bag_mode() {
        let params = HistoryParams::from_stored(
            "vision",
            json!({
                "mode": "rescue",
                "rescueDishName": "Curry",
                "rescueProblem": "Too salty",
                "visionUserContext": "half plate"
            }),
        )
        .unwrap();

        assert_eq!(
            params,
            HistoryParams::Vision {
                vision_user_context: "half plate".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_incomplete_menu_bag() {
        let result = HistoryParams::from_stored("menu", json!({ "eventType": "Party" }));
        assert!(result.is_err());
    }
}
