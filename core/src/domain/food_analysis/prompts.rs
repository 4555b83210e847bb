use crate::domain::food_analysis::value_objects::FoodAnalysisInput;

pub fn food_analysis_prompt(input: &FoodAnalysisInput) -> String {
    let mut lines = vec![
        "You are a nutritionist. Identify every food item visible in this image.".to_string(),
        "Write a short summary of the meal and estimate its total calories, protein, carbohydrates and fat for the portion shown.".to_string(),
        "If you had to assume a portion size, explain the assumption in portionSizeAssumption.".to_string(),
    ];

    let context = input.user_context.as_deref().unwrap_or_default().trim();
    if !context.is_empty() {
        lines.push(format!("Additional context from the user: {}", context));
    }

    lines.join("\n")
}
