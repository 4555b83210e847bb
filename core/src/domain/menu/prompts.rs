use crate::domain::{
    menu::value_objects::{FoodStyle, LocationType, MenuPlanInput},
    recipe::value_objects::Diet,
};

pub fn menu_plan_prompt(input: &MenuPlanInput) -> String {
    let mut lines = vec![
        "You are an expert event caterer and menu planner with knowledge of international cuisine and pricing.".to_string(),
        format!(
            "Create a detailed menu plan for a \"{}\" event being held in {}.",
            input.event_type.trim(),
            input.country_name
        ),
        format!(
            "The plan should be suitable for {} guests with a total budget of {} {}.",
            input.guest_count, input.budget, input.currency_code
        ),
        "The menu should include a variety of dishes, categorized into sections like Appetizers, Main Courses, Sides, Desserts, and Drinks.".to_string(),
        "For each dish, provide a creative name, a short, enticing description, and an estimated bulk cost for that specific dish to serve all guests.".to_string(),
        format!(
            "The entire menu should align with the budget. Provide an estimated cost for the total plan and for each category, in {}, being mindful of local pricing in {}.",
            input.currency_code, input.country_name
        ),
        "Finish with a short plan of action: practical tips for preparing and serving this menu on the day.".to_string(),
    ];

    lines.push(match input.location_type {
        LocationType::Metro => {
            "The event is in a metro city, so use metro-level ingredient and catering prices."
                .to_string()
        }
        LocationType::NonMetro => {
            "The event is in a non-metro town, so use non-metro ingredient and catering prices, which are usually lower."
                .to_string()
        }
    });

    lines.push(match input.food_style {
        FoodStyle::Packed => "The food must be suitable for being individually packed. Suggest items like sandwiches, wraps, grain bowls, or items that hold up well in containers.".to_string(),
        FoodStyle::Unpacked => "The food will be served buffet-style (unpacked). You can suggest a wider variety of dishes suitable for a buffet line.".to_string(),
    });

    let cuisine = input.cuisine.as_deref().unwrap_or_default().trim();
    if !cuisine.is_empty() {
        lines.push(format!("The cuisine style should be {}.", cuisine));
    }

    if input.diet != Diet::Any {
        lines.push(format!("All dishes must be strictly {}.", input.diet.as_str()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MenuPlanInput {
        MenuPlanInput {
            event_type: "Baby Shower".to_string(),
            guest_count: 15,
            budget: 300.0,
            cuisine: None,
            diet: Diet::Any,
            country_name: "India".to_string(),
            currency_code: "INR".to_string(),
            food_style: FoodStyle::Unpacked,
            location_type: LocationType::Metro,
        }
    }

    #[test]
    fn test_menu_prompt_mentions_budget_currency_and_guests() {
        let prompt = menu_plan_prompt(&input());
        assert!(prompt.contains("\"Baby Shower\" event being held in India"));
        assert!(prompt.contains("15 guests with a total budget of 300 INR"));
        assert!(prompt.contains("buffet-style"));
        assert!(!prompt.contains("strictly"));
    }

    #[test]
    fn test_packed_non_metro_vegetarian() {
        let prompt = menu_plan_prompt(&MenuPlanInput {
            food_style: FoodStyle::Packed,
            location_type: LocationType::NonMetro,
            diet: Diet::Vegetarian,
            cuisine: Some("South Indian".to_string()),
            ..input()
        });
        assert!(prompt.contains("individually packed"));
        assert!(prompt.contains("non-metro"));
        assert!(prompt.contains("All dishes must be strictly Vegetarian."));
        assert!(prompt.contains("The cuisine style should be South Indian."));
    }
}
