use crate::domain::recipe::value_objects::{
    CookAge, Diet, IngredientsRecipeInput, MealType, NamedRecipeInput, RecipeFilters, TiffinInput,
};

/// Number of recipes requested from list-producing prompts. Advisory only.
pub const RECIPES_PER_REQUEST: usize = 3;

pub const MINOR_SAFETY_CLAUSE: &str = "IMPORTANT SAFETY RULE: The person cooking is a minor. Do not include any step that uses a stove, oven, open flame, hot oil or sharp knives unless that step explicitly says it must be done under adult supervision.";

/// One independent clause per filter. A filter left at its neutral value adds
/// nothing. Skill level has no neutral value, so its clause is always present.
pub fn filter_clauses(filters: &RecipeFilters, subject: &str) -> Vec<String> {
    let mut clauses = Vec::new();

    let cuisine = filters.cuisine.as_deref().unwrap_or_default().trim();
    if !cuisine.is_empty() {
        clauses.push(format!("The cuisine for the {} should be {}.", subject, cuisine));
    }

    if filters.diet != Diet::Any {
        clauses.push(format!(
            "The {} must be strictly {}.",
            subject,
            filters.diet.as_str()
        ));
    }

    if !filters.preferences.is_empty() {
        let preferences = filters
            .preferences
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        clauses.push(format!(
            "The {} should follow these preferences: {}.",
            subject, preferences
        ));
    }

    let allergies = filters.allergies.trim();
    if !allergies.is_empty() {
        clauses.push(format!(
            "The {} must not contain any of the following allergens or ingredients: {}.",
            subject, allergies
        ));
    }

    clauses.push(format!(
        "The {} should be suitable for a cook whose skill level is {}.",
        subject,
        filters.skill_level.as_str()
    ));

    if filters.cook_age == CookAge::Minor {
        clauses.push(MINOR_SAFETY_CLAUSE.to_string());
    }

    if filters.meal_type != MealType::Any {
        clauses.push(format!(
            "The {} should be suitable for {}.",
            subject,
            filters.meal_type.as_str()
        ));
    }

    if filters.include_nutrition {
        clauses.push(
            "For each recipe, include an estimated per-serving calorie breakdown (total calories, protein, carbohydrates and fat) in the calorieInfo field."
                .to_string(),
        );
    }

    clauses
}

fn servings_clause(servings: u32, subject: &str) -> String {
    format!(
        "The {} should be scaled for {} servings. Adjust ingredient quantities accordingly. The servings field must read \"{} servings\".",
        subject, servings, servings
    )
}

fn assemble(baseline: Vec<String>, clauses: Vec<String>, tail: Option<String>) -> String {
    baseline
        .into_iter()
        .chain(clauses)
        .chain(tail)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn ingredients_prompt(input: &IngredientsRecipeInput) -> String {
    let subject = "recipes";
    let baseline = vec![
        format!(
            "You are a creative chef. Based on the ingredients provided, generate {} diverse and delicious recipes.",
            RECIPES_PER_REQUEST
        ),
        servings_clause(input.filters.servings, subject),
        "For each recipe, provide a name, a brief description, prep time, cook time, servings, a list of all required ingredients, and step-by-step instructions.".to_string(),
        "In the ingredients list, set isProvided to true only for ingredients that appear in my list. Do not assume quantities for the ingredients I provided; list them as needed for the recipe.".to_string(),
    ];

    assemble(
        baseline,
        filter_clauses(&input.filters, subject),
        Some(format!(
            "Ingredients I have: {}.",
            input.ingredients.join(", ")
        )),
    )
}

pub fn named_recipe_prompt(input: &NamedRecipeInput) -> String {
    let subject = "recipe";
    let baseline = vec![
        format!(
            "You are a creative chef. Generate a single, detailed recipe for the following dish: \"{}\".",
            input.dish_name.trim()
        ),
        servings_clause(input.filters.servings, subject),
        "Provide a name, a brief description, prep time, cook time, servings, a complete list of all required ingredients, and step-by-step instructions.".to_string(),
        "For all ingredients in the list, the isProvided field must be set to false.".to_string(),
    ];

    assemble(baseline, filter_clauses(&input.filters, subject), None)
}

pub fn tiffin_prompt(input: &TiffinInput) -> String {
    let subject = "recipes";
    let minutes = input.max_cook_time.minutes();
    let baseline = vec![
        format!(
            "You are a creative chef specialising in tiffin (packed) meals. Generate {} tiffin recipes for a {}.",
            RECIPES_PER_REQUEST,
            input.occasion.as_str()
        ),
        format!(
            "HARD CONSTRAINT: the combined prep time and cook time of every recipe must be under {} minutes.",
            minutes
        ),
        "The food must stay fresh and appetising after being packed for several hours and be easy to eat on the go.".to_string(),
        servings_clause(input.filters.servings, subject),
        "For each recipe, provide a name, a brief description, prep time, cook time, servings, a list of all required ingredients, and step-by-step instructions.".to_string(),
    ];

    let tail = if input.ingredients.is_empty() {
        "I have not listed any ingredients, so set isProvided to false for every ingredient."
            .to_string()
    } else {
        format!(
            "Prefer using these ingredients I have, and set isProvided to true only for them: {}.",
            input.ingredients.join(", ")
        )
    };

    assemble(baseline, filter_clauses(&input.filters, subject), Some(tail))
}

pub fn recipe_image_prompt(name: &str, description: &str) -> String {
    format!(
        "A delicious, photorealistic image of {}. {}. Professional food photography, clean background, appetizing.",
        name.trim(),
        description.trim().trim_end_matches('.')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::value_objects::{MaxCookTime, Occasion, Preference, SkillLevel};

    fn input(filters: RecipeFilters) -> IngredientsRecipeInput {
        IngredientsRecipeInput {
            ingredients: vec!["flour".to_string(), "water".to_string(), "oil".to_string()],
            filters,
        }
    }

    #[test]
    fn test_vegetarian_two_servings_scenario() {
        let prompt = ingredients_prompt(&input(RecipeFilters {
            diet: Diet::Vegetarian,
            servings: 2,
            ..RecipeFilters::default()
        }));

        assert!(prompt.contains("The recipes must be strictly Vegetarian."));
        assert!(prompt.contains("scaled for 2 servings"));
        assert!(prompt.contains("\"2 servings\""));
        assert!(prompt.ends_with("Ingredients I have: flour, water, oil."));
    }

    #[test]
    fn test_default_filters_add_only_skill_level_clause() {
        let defaults = RecipeFilters::default();
        assert_eq!(
            filter_clauses(&defaults, "recipes"),
            vec!["The recipes should be suitable for a cook whose skill level is Beginner."]
        );

        let prompt = ingredients_prompt(&input(defaults));

        assert!(!prompt.contains("cuisine"));
        assert!(!prompt.contains("strictly"));
        assert!(!prompt.contains("preferences"));
        assert!(!prompt.contains("allergens"));
        assert!(!prompt.contains("SAFETY"));
        assert!(!prompt.contains("calorieInfo"));
    }

    #[test]
    fn test_clauses_are_additive_and_keep_baseline() {
        let baseline = ingredients_prompt(&input(RecipeFilters::default()));

        let mut filters = RecipeFilters {
            cuisine: Some("Thai".to_string()),
            allergies: "peanuts".to_string(),
            meal_type: MealType::Dinner,
            include_nutrition: true,
            ..RecipeFilters::default()
        };
        filters.preferences.insert(Preference::Spicy);
        filters.preferences.insert(Preference::LowCarb);
        let enriched = ingredients_prompt(&input(filters));

        for line in baseline.lines() {
            assert!(enriched.contains(line), "missing baseline line: {}", line);
        }
        assert!(enriched.contains("The cuisine for the recipes should be Thai."));
        assert!(enriched.contains("following allergens or ingredients: peanuts."));
        assert!(enriched.contains("should follow these preferences: Low Carb, Spicy."));
        assert!(enriched.contains("suitable for Dinner."));
        assert!(enriched.contains("calorieInfo"));
    }

    #[test]
    fn test_blank_cuisine_is_ignored() {
        let clauses = filter_clauses(
            &RecipeFilters {
                cuisine: Some("   ".to_string()),
                ..RecipeFilters::default()
            },
            "recipes",
        );
        assert!(clauses.iter().all(|c| !c.contains("cuisine")));
    }

    #[test]
    fn test_minor_cook_gets_safety_clause() {
        let prompt = ingredients_prompt(&input(RecipeFilters {
            cook_age: CookAge::Minor,
            skill_level: SkillLevel::Expert,
            ..RecipeFilters::default()
        }));

        assert!(prompt.contains(MINOR_SAFETY_CLAUSE));
        assert!(prompt.contains("a cook whose skill level is Expert."));
    }

    #[test]
    fn test_named_prompt_forces_unprovided_ingredients() {
        let prompt = named_recipe_prompt(&NamedRecipeInput {
            dish_name: "  Paneer Tikka ".to_string(),
            filters: RecipeFilters::default(),
        });

        assert!(prompt.contains("dish: \"Paneer Tikka\""));
        assert!(prompt.contains("isProvided field must be set to false"));
        assert!(prompt.contains("The recipe should be scaled for 2 servings"));
    }

    #[test]
    fn test_tiffin_prompt_carries_time_limit_and_occasion() {
        let prompt = tiffin_prompt(&TiffinInput {
            max_cook_time: MaxCookTime::Fifteen,
            occasion: Occasion::SchoolLunch,
            ingredients: Vec::new(),
            filters: RecipeFilters::default(),
        });

        assert!(prompt.contains("for a School Lunch"));
        assert!(prompt.contains("must be under 15 minutes"));
        assert!(prompt.contains("set isProvided to false for every ingredient"));
    }

    #[test]
    fn test_recipe_image_prompt_does_not_double_punctuate() {
        assert_eq!(
            recipe_image_prompt("Masala Dosa", "Crispy rice crepe."),
            "A delicious, photorealistic image of Masala Dosa. Crispy rice crepe. Professional food photography, clean background, appetizing."
        );
    }
}
