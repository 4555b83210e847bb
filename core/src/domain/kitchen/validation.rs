use thiserror::Error;

use crate::domain::{
    food_analysis::value_objects::FoodAnalysisInput,
    history::{entities::NewHistoryItem, value_objects::HistoryParams},
    kitchen::{
        actions::GenerationRequest,
        state::KitchenState,
        value_objects::{Mode, RecipeFinderMode},
    },
    menu::value_objects::MenuPlanInput,
    recipe::value_objects::{IngredientsRecipeInput, NamedRecipeInput, TiffinInput},
    rescue::entities::RecipeFixInput,
};

/// Input problems caught before any request is sent. The message is shown
/// to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid number of servings.")]
    InvalidServings,

    #[error("Please add at least one ingredient.")]
    NoIngredients,

    #[error("Please enter a recipe name to search for.")]
    NoRecipeQuery,

    #[error("Please fill in all event details.")]
    IncompleteEvent,

    #[error("Please describe the dish and the problem.")]
    IncompleteRescue,

    #[error("Please upload an image first.")]
    NoImage,

    #[error("Please sign in to view your saved recipes.")]
    SignInRequired,
}

/// A request plus the history entry describing it, if the mode keeps one.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedGeneration {
    pub request: GenerationRequest,
    pub history: Option<NewHistoryItem>,
}

fn entry(display_title: String, params: HistoryParams) -> Option<NewHistoryItem> {
    Some(NewHistoryItem {
        display_title,
        params,
    })
}

/// Validates the current mode's form and derives its request.
pub fn prepare_generation(state: &KitchenState) -> Result<PreparedGeneration, ValidationError> {
    let forms = &state.forms;
    let shared = &forms.shared;

    let (request, history) = match state.mode {
        Mode::Recipe => {
            let servings = shared.servings().ok_or(ValidationError::InvalidServings)?;
            let filters = shared.filters(servings);
            let recipe = &forms.recipe;

            match recipe.finder_mode {
                RecipeFinderMode::Ingredient => {
                    if shared.ingredients.is_empty() {
                        return Err(ValidationError::NoIngredients);
                    }
                    (
                        GenerationRequest::RecipesByIngredients(IngredientsRecipeInput {
                            ingredients: shared.ingredients.clone(),
                            filters: filters.clone(),
                        }),
                        entry(
                            format!("Recipe from {} ingredients", shared.ingredients.len()),
                            HistoryParams::Recipe {
                                recipe_finder_mode: RecipeFinderMode::Ingredient,
                                ingredients: shared.ingredients.clone(),
                                recipe_query: String::new(),
                                filters,
                            },
                        ),
                    )
                }
                RecipeFinderMode::Name => {
                    let query = recipe.recipe_query.trim();
                    if query.is_empty() {
                        return Err(ValidationError::NoRecipeQuery);
                    }
                    (
                        GenerationRequest::RecipeByName(NamedRecipeInput {
                            dish_name: query.to_string(),
                            filters: filters.clone(),
                        }),
                        entry(
                            format!("Recipe for: {}", query),
                            HistoryParams::Recipe {
                                recipe_finder_mode: RecipeFinderMode::Name,
                                ingredients: Vec::new(),
                                recipe_query: query.to_string(),
                                filters,
                            },
                        ),
                    )
                }
            }
        }
        Mode::Tiffin => {
            let servings = shared.servings().ok_or(ValidationError::InvalidServings)?;
            let filters = shared.filters(servings);
            let tiffin = &forms.tiffin;

            (
                GenerationRequest::Tiffin(TiffinInput {
                    max_cook_time: tiffin.max_cook_time,
                    occasion: tiffin.occasion,
                    ingredients: shared.ingredients.clone(),
                    filters: filters.clone(),
                }),
                entry(
                    format!(
                        "{} under {} mins",
                        tiffin.occasion.as_str(),
                        tiffin.max_cook_time.minutes()
                    ),
                    HistoryParams::Tiffin {
                        max_cook_time: tiffin.max_cook_time,
                        occasion: tiffin.occasion,
                        ingredients: shared.ingredients.clone(),
                        filters,
                    },
                ),
            )
        }
        Mode::Menu => {
            let menu = &forms.menu;
            let event_type = menu.event_type.trim();
            let guest_count = menu.guest_count.filter(|g| *g > 0);
            let budget = menu.budget.filter(|b| b.is_finite() && *b > 0.0);

            let (Some(guest_count), Some(budget)) = (guest_count, budget) else {
                return Err(ValidationError::IncompleteEvent);
            };
            if event_type.is_empty() {
                return Err(ValidationError::IncompleteEvent);
            }

            let country = menu.selected_country();
            (
                GenerationRequest::MenuPlan(MenuPlanInput {
                    event_type: event_type.to_string(),
                    guest_count,
                    budget,
                    cuisine: shared.cuisine(),
                    diet: shared.diet,
                    country_name: country.name.to_string(),
                    currency_code: country.currency_code.to_string(),
                    food_style: menu.food_style,
                    location_type: menu.location_type,
                }),
                entry(
                    format!("Menu for {} ({} guests)", event_type, guest_count),
                    HistoryParams::Menu {
                        event_type: event_type.to_string(),
                        guest_count,
                        budget,
                        country: menu.country.clone(),
                        location_type: menu.location_type,
                        food_style: menu.food_style,
                        cuisine: shared.cuisine(),
                        diet: shared.diet,
                    },
                ),
            )
        }
        Mode::Rescue => {
            let dish_name = forms.rescue.dish_name.trim();
            let problem = forms.rescue.problem.trim();
            if dish_name.is_empty() || problem.is_empty() {
                return Err(ValidationError::IncompleteRescue);
            }

            (
                GenerationRequest::RecipeFix(RecipeFixInput {
                    dish_name: dish_name.to_string(),
                    problem: problem.to_string(),
                }),
                entry(
                    format!("Rescue plan for: {}", dish_name),
                    HistoryParams::Rescue {
                        rescue_dish_name: dish_name.to_string(),
                        rescue_problem: problem.to_string(),
                    },
                ),
            )
        }
        Mode::Vision => {
            let image = forms.vision.image.as_ref().ok_or(ValidationError::NoImage)?;
            let context = forms.vision.user_context.trim();

            (
                GenerationRequest::FoodAnalysis(FoodAnalysisInput {
                    image_data: image.data.clone(),
                    mime_type: image.mime_type.clone(),
                    user_context: (!context.is_empty()).then(|| context.to_string()),
                }),
                entry(
                    "Calorie Vision Analysis".to_string(),
                    HistoryParams::Vision {
                        vision_user_context: context.to_string(),
                    },
                ),
            )
        }
        Mode::Saved => {
            let profile = state
                .profile
                .as_ref()
                .ok_or(ValidationError::SignInRequired)?;
            (
                GenerationRequest::SavedRecipes {
                    user_id: profile.id,
                },
                None,
            )
        }
    };

    Ok(PreparedGeneration { request, history })
}
