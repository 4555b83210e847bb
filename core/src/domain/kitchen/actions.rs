use uuid::Uuid;

use crate::domain::{
    account::entities::UserProfile,
    food_analysis::value_objects::FoodAnalysisInput,
    history::entities::{HistoryItem, NewHistoryItem},
    kitchen::{
        forms::FormEdit,
        state::Results,
        value_objects::{Mode, RecipeFinderMode},
    },
    menu::value_objects::MenuPlanInput,
    recipe::{
        entities::Recipe,
        value_objects::{IngredientsRecipeInput, NamedRecipeInput, Preference, TiffinInput},
    },
    rescue::entities::RecipeFixInput,
};

/// Everything that can happen to the kitchen, from the user or from a
/// completed effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetMode(Mode),
    SetFinderMode(RecipeFinderMode),
    AddIngredient(String),
    RemoveIngredient(String),
    TogglePreference(Preference),
    Edit(FormEdit),
    Generate,
    RequestSucceeded { token: u64, results: Results },
    RequestFailed { token: u64, message: String },
    SessionStarted(UserProfile),
    SignedOut,
    NameUpdated(UserProfile),
    ProfileLoaded(UserProfile),
    DismissNamePrompt,
    HistoryLoaded(Vec<HistoryItem>),
    HistoryAppended(HistoryItem),
    HistoryCleared,
    SavedRecipesLoaded(Vec<Recipe>),
    RecipeSaved { name: String, id: String },
    RecipeUnsaved { name: String },
    SelectHistory(HistoryItem),
    AddToShoppingList(Vec<String>),
    ClearShoppingList,
    ImageRejected(String),
}

/// A validated request ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    RecipesByIngredients(IngredientsRecipeInput),
    RecipeByName(NamedRecipeInput),
    Tiffin(TiffinInput),
    MenuPlan(MenuPlanInput),
    RecipeFix(RecipeFixInput),
    FoodAnalysis(FoodAnalysisInput),
    SavedRecipes { user_id: Uuid },
}

impl GenerationRequest {
    /// User-facing message shown when the request fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            GenerationRequest::RecipesByIngredients(_)
            | GenerationRequest::RecipeByName(_)
            | GenerationRequest::Tiffin(_) => {
                "Sorry, I couldn't generate recipes. Please try again later."
            }
            GenerationRequest::MenuPlan(_) => {
                "Sorry, I couldn't generate a menu plan. Please try again later."
            }
            GenerationRequest::RecipeFix(_) => {
                "Sorry, I couldn't generate a rescue plan. Please try again later."
            }
            GenerationRequest::FoodAnalysis(_) => {
                "Sorry, I couldn't analyze the image. Please try again."
            }
            GenerationRequest::SavedRecipes { .. } => "Could not load your saved recipes.",
        }
    }
}

/// Side effects requested by the reducer. Each one resolves to at most one
/// follow-up [`Action`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request {
        token: u64,
        request: GenerationRequest,
    },
    RecordHistory {
        user_id: Uuid,
        item: NewHistoryItem,
    },
    LoadHistory {
        user_id: Uuid,
    },
    LoadSavedRecipes {
        user_id: Uuid,
    },
}
