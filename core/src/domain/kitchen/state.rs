use std::collections::HashMap;

use crate::domain::{
    account::entities::UserProfile,
    food_analysis::entities::FoodAnalysis,
    history::entities::HistoryItem,
    kitchen::{
        forms::Forms,
        value_objects::{Mode, RecipeFinderMode},
    },
    menu::entities::MenuPlan,
    recipe::entities::Recipe,
    rescue::entities::RecipeFix,
    shopping::entities::ShoppingList,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// Waiting for the request identified by `token`, started in `mode`.
    Requesting { token: u64, mode: Mode },
    Displaying,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Results {
    #[default]
    None,
    Recipes(Vec<Recipe>),
    MenuPlan(MenuPlan),
    RecipeFix(RecipeFix),
    FoodAnalysis(FoodAnalysis),
}

impl Results {
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            Results::Recipes(recipes) => recipes,
            _ => &[],
        }
    }

    pub fn recipes_mut(&mut self) -> &mut [Recipe] {
        match self {
            Results::Recipes(recipes) => recipes,
            _ => &mut [],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KitchenState {
    pub mode: Mode,
    pub forms: Forms,
    pub phase: Phase,
    pub results: Results,
    pub error: Option<String>,
    pub profile: Option<UserProfile>,
    pub name_prompt_open: bool,
    pub history: Vec<HistoryItem>,
    /// Saved recipe record ids keyed by recipe name.
    pub saved_recipe_ids: HashMap<String, String>,
    pub shopping_list: ShoppingList,
    pub(crate) last_token: u64,
}

impl KitchenState {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Requesting { .. })
    }

    pub fn is_generate_enabled(&self) -> bool {
        if self.is_loading() {
            return false;
        }

        let shared = &self.forms.shared;
        match self.mode {
            Mode::Recipe => {
                shared.servings().is_some()
                    && match self.forms.recipe.finder_mode {
                        RecipeFinderMode::Ingredient => !shared.ingredients.is_empty(),
                        RecipeFinderMode::Name => !self.forms.recipe.recipe_query.trim().is_empty(),
                    }
            }
            Mode::Tiffin => shared.servings().is_some(),
            Mode::Menu => {
                let menu = &self.forms.menu;
                !menu.event_type.trim().is_empty()
                    && menu.guest_count.is_some_and(|g| g > 0)
                    && menu.budget.is_some_and(|b| b.is_finite() && b > 0.0)
            }
            Mode::Rescue => {
                !self.forms.rescue.dish_name.trim().is_empty()
                    && !self.forms.rescue.problem.trim().is_empty()
            }
            Mode::Vision => self.forms.vision.image.is_some(),
            Mode::Saved => false,
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_loading() {
            return "Generating...";
        }

        match self.mode {
            Mode::Recipe => "Generate Recipes",
            Mode::Tiffin => "Find Tiffin Ideas",
            Mode::Menu => "Generate Menu Plan",
            Mode::Rescue => "Get Rescue Plan",
            Mode::Vision => "Analyze Image",
            Mode::Saved => "View My Saved Recipes",
        }
    }

    pub fn find_recipe(&self, name: &str) -> Option<&Recipe> {
        self.results.recipes().iter().find(|r| r.name == name)
    }

    /// Copies known saved ids onto displayed recipes, matching by name.
    pub(crate) fn reconcile_saved(&mut self) {
        let ids = &self.saved_recipe_ids;
        for recipe in self.results.recipes_mut() {
            match ids.get(&recipe.name) {
                Some(id) => recipe.mark_saved(id.clone()),
                None => recipe.clear_saved(),
            }
        }
    }

    pub(crate) fn next_token(&mut self) -> u64 {
        self.last_token += 1;
        self.last_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{kitchen::forms::FormEdit, recipe::entities::fixtures::recipe};

    #[test]
    fn test_button_label_follows_mode_and_phase() {
        let mut state = KitchenState::default();
        assert_eq!(state.button_label(), "Generate Recipes");

        state.mode = Mode::Tiffin;
        assert_eq!(state.button_label(), "Find Tiffin Ideas");

        state.phase = Phase::Requesting {
            token: 1,
            mode: Mode::Tiffin,
        };
        assert_eq!(state.button_label(), "Generating...");
        assert!(!state.is_generate_enabled());
    }

    #[test]
    fn test_generate_enabled_per_mode() {
        let mut state = KitchenState::default();
        assert!(state.is_generate_enabled());

        state.forms.recipe.finder_mode = RecipeFinderMode::Name;
        assert!(!state.is_generate_enabled());
        state.forms.apply(FormEdit::RecipeQuery("Pad Thai".to_string()));
        assert!(state.is_generate_enabled());

        state.mode = Mode::Rescue;
        assert!(!state.is_generate_enabled());

        state.mode = Mode::Vision;
        assert!(!state.is_generate_enabled());

        state.mode = Mode::Saved;
        assert!(!state.is_generate_enabled());

        state.mode = Mode::Menu;
        assert!(state.is_generate_enabled());
        state.forms.apply(FormEdit::Budget(None));
        assert!(!state.is_generate_enabled());
    }

    #[test]
    fn test_menu_needs_positive_guests_and_budget() {
        let mut state = KitchenState {
            mode: Mode::Menu,
            ..KitchenState::default()
        };
        assert!(state.is_generate_enabled());

        state.forms.apply(FormEdit::GuestCount(Some(0)));
        assert!(!state.is_generate_enabled());
        state.forms.apply(FormEdit::GuestCount(Some(12)));
        assert!(state.is_generate_enabled());

        for budget in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            state.forms.apply(FormEdit::Budget(Some(budget)));
            assert!(!state.is_generate_enabled(), "budget {}", budget);
        }
        state.forms.apply(FormEdit::Budget(Some(5000.0)));
        assert!(state.is_generate_enabled());
    }

    #[test]
    fn test_reconcile_saved_matches_by_name() {
        let mut state = KitchenState::default();
        let mut stale = recipe("Upma");
        stale.mark_saved("old".to_string());
        state.results = Results::Recipes(vec![recipe("Poha"), stale]);
        state
            .saved_recipe_ids
            .insert("Poha".to_string(), "7".to_string());

        state.reconcile_saved();

        let recipes = state.results.recipes();
        assert!(recipes[0].is_saved);
        assert_eq!(recipes[0].id.as_deref(), Some("7"));
        assert!(!recipes[1].is_saved);
        assert_eq!(recipes[1].id, None);
    }
}
