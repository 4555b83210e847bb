use std::collections::HashMap;

use tracing::debug;

use crate::domain::{
    history::{
        entities::{HISTORY_LIMIT, prepend_capped},
        value_objects::HistoryParams,
    },
    kitchen::{
        actions::{Action, Effect},
        forms::{Forms, TIFFIN_DEFAULT_SERVINGS},
        state::{KitchenState, Phase, Results},
        validation::{PreparedGeneration, prepare_generation},
        value_objects::{Mode, RecipeFinderMode},
    },
    recipe::{entities::Recipe, value_objects::DEFAULT_SERVINGS},
};

/// Applies `action` to `state` and returns the new state together with the
/// effects the caller must run. Never performs I/O.
pub fn reduce(mut state: KitchenState, action: Action) -> (KitchenState, Vec<Effect>) {
    let mut effects = Vec::new();

    match action {
        Action::SetMode(mode) => {
            state.mode = mode;
            state.results = Results::None;
            state.error = None;
            state.phase = Phase::Idle;
            state.forms.vision.user_context.clear();

            match mode {
                Mode::Tiffin => state.forms.shared.servings = Some(TIFFIN_DEFAULT_SERVINGS),
                Mode::Recipe => state.forms.shared.servings = Some(DEFAULT_SERVINGS),
                Mode::Saved if state.profile.is_some() => {
                    start_generation(&mut state, &mut effects)
                }
                _ => {}
            }
        }
        Action::SetFinderMode(finder_mode) => state.forms.recipe.finder_mode = finder_mode,
        Action::AddIngredient(ingredient) => {
            state.forms.shared.add_ingredient(&ingredient);
        }
        Action::RemoveIngredient(ingredient) => state.forms.shared.remove_ingredient(&ingredient),
        Action::TogglePreference(preference) => state.forms.shared.toggle_preference(preference),
        Action::Edit(edit) => state.forms.apply(edit),
        Action::Generate => start_generation(&mut state, &mut effects),
        Action::RequestSucceeded { token, results } => {
            if is_current(&state, token) {
                if state.mode == Mode::Saved {
                    state.saved_recipe_ids = index_saved(results.recipes());
                }
                state.results = results;
                state.reconcile_saved();
                state.phase = Phase::Displaying;
            } else {
                debug!("Dropping stale result of request {}", token);
            }
        }
        Action::RequestFailed { token, message } => {
            if is_current(&state, token) {
                state.error = Some(message);
                state.phase = Phase::Idle;
            } else {
                debug!("Dropping stale failure of request {}", token);
            }
        }
        Action::SessionStarted(profile) => {
            state.name_prompt_open = profile.needs_name();
            effects.push(Effect::LoadHistory {
                user_id: profile.id,
            });
            effects.push(Effect::LoadSavedRecipes {
                user_id: profile.id,
            });
            state.profile = Some(profile);
        }
        Action::SignedOut => {
            state.profile = None;
            state.name_prompt_open = false;
            state.history.clear();
            state.saved_recipe_ids.clear();
            state.reconcile_saved();
            if state.mode == Mode::Saved {
                state.results = Results::None;
                state.phase = Phase::Idle;
            }
        }
        Action::NameUpdated(profile) => {
            state.profile = Some(profile);
            state.name_prompt_open = false;
        }
        Action::ProfileLoaded(profile) => {
            state.name_prompt_open = profile.needs_name();
            state.profile = Some(profile);
        }
        Action::DismissNamePrompt => state.name_prompt_open = false,
        Action::HistoryLoaded(mut items) => {
            items.truncate(HISTORY_LIMIT);
            state.history = items;
        }
        Action::HistoryAppended(item) => prepend_capped(&mut state.history, item),
        Action::HistoryCleared => state.history.clear(),
        Action::SavedRecipesLoaded(recipes) => {
            state.saved_recipe_ids = index_saved(&recipes);
            state.reconcile_saved();
        }
        Action::RecipeSaved { name, id } => {
            state.saved_recipe_ids.insert(name, id);
            state.reconcile_saved();
        }
        Action::RecipeUnsaved { name } => {
            state.saved_recipe_ids.remove(&name);
            state.reconcile_saved();
            if state.mode == Mode::Saved {
                if let Results::Recipes(recipes) = &mut state.results {
                    recipes.retain(|r| r.name != name);
                }
            }
        }
        Action::SelectHistory(item) => {
            state.mode = item.mode();
            state.results = Results::None;
            state.error = None;
            state.phase = Phase::Idle;
            restore_forms(&mut state.forms, item.params);

            if state.mode == Mode::Vision {
                // The photo itself is never stored, so there is nothing to replay.
                state.forms.vision.image = None;
            } else {
                start_generation(&mut state, &mut effects);
            }
        }
        Action::AddToShoppingList(items) => state.shopping_list.add_items(items),
        Action::ClearShoppingList => state.shopping_list.clear(),
        Action::ImageRejected(message) => {
            state.forms.vision.image = None;
            state.error = Some(message);
        }
    }

    (state, effects)
}

fn is_current(state: &KitchenState, token: u64) -> bool {
    matches!(
        state.phase,
        Phase::Requesting { token: pending, mode } if pending == token && mode == state.mode
    )
}

fn index_saved(recipes: &[Recipe]) -> HashMap<String, String> {
    recipes
        .iter()
        .filter_map(|r| r.id.clone().map(|id| (r.name.clone(), id)))
        .collect()
}

fn start_generation(state: &mut KitchenState, effects: &mut Vec<Effect>) {
    state.error = None;

    match prepare_generation(state) {
        Ok(PreparedGeneration { request, history }) => {
            let token = state.next_token();
            state.phase = Phase::Requesting {
                token,
                mode: state.mode,
            };
            effects.push(Effect::Request { token, request });

            if let (Some(profile), Some(item)) = (state.profile.as_ref(), history) {
                effects.push(Effect::RecordHistory {
                    user_id: profile.id,
                    item,
                });
            }
        }
        Err(e) => {
            debug!("Generation rejected in {} mode: {}", state.mode.as_str(), e);
            state.error = Some(e.to_string());
            state.phase = Phase::Idle;
        }
    }
}

fn restore_forms(forms: &mut Forms, params: HistoryParams) {
    match params {
        HistoryParams::Recipe {
            recipe_finder_mode,
            ingredients,
            recipe_query,
            filters,
        } => {
            forms.recipe.finder_mode = recipe_finder_mode;
            forms.recipe.recipe_query = recipe_query;
            if recipe_finder_mode == RecipeFinderMode::Ingredient {
                forms.shared.ingredients = ingredients;
            }
            forms.shared.restore_filters(&filters);
        }
        HistoryParams::Tiffin {
            max_cook_time,
            occasion,
            ingredients,
            filters,
        } => {
            forms.tiffin.max_cook_time = max_cook_time;
            forms.tiffin.occasion = occasion;
            forms.shared.ingredients = ingredients;
            forms.shared.restore_filters(&filters);
        }
        HistoryParams::Menu {
            event_type,
            guest_count,
            budget,
            country,
            location_type,
            food_style,
            cuisine,
            diet,
        } => {
            forms.menu.event_type = event_type;
            forms.menu.guest_count = Some(guest_count);
            forms.menu.budget = Some(budget);
            forms.menu.country = country;
            forms.menu.location_type = location_type;
            forms.menu.food_style = food_style;
            forms.shared.cuisine = cuisine.unwrap_or_default();
            forms.shared.diet = diet;
        }
        HistoryParams::Rescue {
            rescue_dish_name,
            rescue_problem,
        } => {
            forms.rescue.dish_name = rescue_dish_name;
            forms.rescue.problem = rescue_problem;
        }
        HistoryParams::Vision {
            vision_user_context,
        } => forms.vision.user_context = vision_user_context,
    }
}
