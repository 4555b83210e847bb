use std::sync::Arc;

use futures::future::join_all;
use tokio::{sync::Mutex, task::JoinSet};
use tracing::{debug, error, info};

use crate::domain::{
    account::{
        entities::UserProfile,
        ports::{AuthRepository, ProfileRepository},
    },
    common::entities::app_errors::CoreError,
    food_analysis::{
        cache::{AnalysisCache, content_key},
        entities::FoodAnalysis,
        image::prepare_image,
        value_objects::FoodAnalysisInput,
    },
    generation::ports::RecipeAiService,
    history::ports::HistoryRepository,
    kitchen::{
        actions::{Action, Effect, GenerationRequest},
        forms::FormEdit,
        reducer::reduce,
        state::{KitchenState, Results},
    },
    persistence::PersistenceFacade,
    recipe::entities::Recipe,
    saved_recipe::ports::SavedRecipeRepository,
    shopping::entities::ShoppingLink,
};

/// The I/O side of the kitchen, shared with the tasks running effects.
struct KitchenServices<AI, A, P, H, S> {
    ai: AI,
    persistence: PersistenceFacade<A, P, H, S>,
    analysis_cache: Mutex<AnalysisCache>,
}

impl<AI, A, P, H, S> KitchenServices<AI, A, P, H, S>
where
    AI: RecipeAiService,
    A: AuthRepository,
    P: ProfileRepository,
    H: HistoryRepository,
    S: SavedRecipeRepository,
{
    /// Executes one effect and returns the action describing its outcome.
    async fn perform(&self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::Request { token, request } => {
                let message = request.failure_message();
                match self.run_request(request).await {
                    Ok(results) => Some(Action::RequestSucceeded { token, results }),
                    Err(e) => {
                        error!("Request {} failed: {}", token, e);
                        Some(Action::RequestFailed {
                            token,
                            message: message.to_string(),
                        })
                    }
                }
            }
            Effect::RecordHistory { user_id, item } => self
                .persistence
                .append_history(user_id, item)
                .await
                .ok()
                .flatten()
                .map(Action::HistoryAppended),
            Effect::LoadHistory { user_id } => self
                .persistence
                .list_history(user_id)
                .await
                .ok()
                .map(Action::HistoryLoaded),
            Effect::LoadSavedRecipes { user_id } => self
                .persistence
                .list_saved_recipes(user_id)
                .await
                .ok()
                .map(Action::SavedRecipesLoaded),
        }
    }

    async fn run_request(&self, request: GenerationRequest) -> Result<Results, CoreError> {
        let results = match request {
            GenerationRequest::RecipesByIngredients(input) => {
                let recipes = self.ai.request_recipes_by_ingredients(input).await?;
                Results::Recipes(self.attach_images(recipes).await)
            }
            GenerationRequest::RecipeByName(input) => {
                let recipes = self.ai.request_recipe_by_name(input).await?;
                Results::Recipes(self.attach_images(recipes).await)
            }
            GenerationRequest::Tiffin(input) => {
                let recipes = self.ai.request_tiffin_recipes(input).await?;
                Results::Recipes(self.attach_images(recipes).await)
            }
            GenerationRequest::MenuPlan(input) => {
                Results::MenuPlan(self.ai.request_menu_plan(input).await?)
            }
            GenerationRequest::RecipeFix(input) => {
                Results::RecipeFix(self.ai.request_recipe_fix(input).await?)
            }
            GenerationRequest::FoodAnalysis(input) => {
                Results::FoodAnalysis(self.analyze_food(input).await?)
            }
            GenerationRequest::SavedRecipes { user_id } => {
                Results::Recipes(self.persistence.list_saved_recipes(user_id).await?)
            }
        };

        Ok(results)
    }

    /// Requests one image per recipe concurrently. A failed image leaves that
    /// recipe without one.
    async fn attach_images(&self, mut recipes: Vec<Recipe>) -> Vec<Recipe> {
        let images = join_all(recipes.iter().map(|r| {
            self.ai
                .request_recipe_image(r.name.clone(), r.description.clone())
        }))
        .await;

        for (recipe, image) in recipes.iter_mut().zip(images) {
            recipe.image_url = image;
        }
        recipes
    }

    async fn analyze_food(&self, input: FoodAnalysisInput) -> Result<FoodAnalysis, CoreError> {
        let key = content_key(&input.image_data);

        let cached = self.analysis_cache.lock().await.get(&key);
        if let Some(analysis) = cached {
            debug!("Food analysis cache hit for {}", key);
            return Ok(analysis);
        }

        let analysis = self.ai.request_food_analysis(input).await?;
        self.analysis_cache
            .lock()
            .await
            .insert(key, analysis.clone());
        Ok(analysis)
    }
}

/// Owns the kitchen state and runs the effects the reducer asks for.
///
/// Effects run as background tasks, so actions keep being applied while a
/// request is in flight; a result that arrives after the user moved on is
/// dropped by the reducer. Must be used inside a tokio runtime.
pub struct KitchenController<AI, A, P, H, S> {
    services: Arc<KitchenServices<AI, A, P, H, S>>,
    state: KitchenState,
    in_flight: JoinSet<Option<Action>>,
}

impl<AI, A, P, H, S> KitchenController<AI, A, P, H, S>
where
    AI: RecipeAiService + 'static,
    A: AuthRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
    S: SavedRecipeRepository + 'static,
{
    pub fn new(ai: AI, persistence: PersistenceFacade<A, P, H, S>) -> Self {
        Self::with_cache(ai, persistence, AnalysisCache::default())
    }

    pub fn with_cache(
        ai: AI,
        persistence: PersistenceFacade<A, P, H, S>,
        analysis_cache: AnalysisCache,
    ) -> Self {
        Self {
            services: Arc::new(KitchenServices {
                ai,
                persistence,
                analysis_cache: Mutex::new(analysis_cache),
            }),
            state: KitchenState::default(),
            in_flight: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &KitchenState {
        &self.state
    }

    pub fn persistence(&self) -> &PersistenceFacade<A, P, H, S> {
        &self.services.persistence
    }

    /// True while effects are still running.
    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Applies `action` immediately and starts its effects in the background.
    /// Their outcomes are applied by [`Self::process_next`].
    pub fn send(&mut self, action: Action) {
        let (state, effects) = reduce(std::mem::take(&mut self.state), action);
        self.state = state;

        for effect in effects {
            let services = Arc::clone(&self.services);
            self.in_flight
                .spawn(async move { services.perform(effect).await });
        }
    }

    /// Waits for the next effect to finish and applies its outcome. Returns
    /// `false` when nothing was in flight.
    pub async fn process_next(&mut self) -> bool {
        let Some(joined) = self.in_flight.join_next().await else {
            return false;
        };

        match joined {
            Ok(Some(action)) => self.send(action),
            Ok(None) => {}
            Err(e) => error!("Kitchen effect task failed: {}", e),
        }
        true
    }

    /// Applies outcomes until no effect is left running.
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    /// Runs `action` and every follow-up action its effects produce.
    pub async fn dispatch(&mut self, action: Action) {
        self.send(action);
        self.settle().await;
    }

    pub async fn sign_in(&mut self, id_token: String) -> Result<UserProfile, CoreError> {
        let profile = self
            .services
            .persistence
            .sign_in_with_external_token(id_token)
            .await?;
        self.dispatch(Action::SessionStarted(profile.clone())).await;
        Ok(profile)
    }

    pub async fn sign_out(&mut self) {
        self.services.persistence.sign_out().await;
        self.dispatch(Action::SignedOut).await;
    }

    /// Reloads the signed in user's profile and reopens the name prompt if
    /// the stored profile still has no name.
    pub async fn refresh_profile(&mut self) -> Result<(), CoreError> {
        let Some(user_id) = self.state.profile.as_ref().map(|p| p.id) else {
            return Ok(());
        };

        if let Some(profile) = self.services.persistence.fetch_profile(user_id).await? {
            self.dispatch(Action::ProfileLoaded(profile)).await;
        }
        Ok(())
    }

    /// Stores the display name asked for by the name prompt.
    pub async fn submit_name(&mut self, name: String) -> Result<(), CoreError> {
        let Some(user_id) = self.state.profile.as_ref().map(|p| p.id) else {
            return Ok(());
        };

        if let Some(profile) = self.services.persistence.update_profile_name(user_id, name).await? {
            self.dispatch(Action::NameUpdated(profile)).await;
        }
        Ok(())
    }

    /// Bookmarks a displayed recipe. Returns whether the state changed; a
    /// backend failure leaves everything as it was.
    pub async fn save_recipe(&mut self, name: &str) -> bool {
        let Some(user_id) = self.state.profile.as_ref().map(|p| p.id) else {
            return false;
        };
        let Some(recipe) = self.state.find_recipe(name).filter(|r| !r.is_saved).cloned() else {
            return false;
        };

        match self.services.persistence.save_recipe(user_id, &recipe).await {
            Ok(Some(id)) => {
                info!("Saved recipe '{}' as {}", recipe.name, id);
                self.dispatch(Action::RecipeSaved {
                    name: recipe.name,
                    id,
                })
                .await;
                true
            }
            _ => false,
        }
    }

    pub async fn unsave_recipe(&mut self, name: &str) -> bool {
        let Some(user_id) = self.state.profile.as_ref().map(|p| p.id) else {
            return false;
        };
        let Some(record_id) = self.state.saved_recipe_ids.get(name).cloned() else {
            return false;
        };

        match self.services.persistence.unsave_recipe(user_id, record_id).await {
            Ok(true) => {
                self.dispatch(Action::RecipeUnsaved {
                    name: name.to_string(),
                })
                .await;
                true
            }
            _ => false,
        }
    }

    pub async fn toggle_saved(&mut self, name: &str) -> bool {
        if self.state.saved_recipe_ids.contains_key(name) {
            self.unsave_recipe(name).await
        } else {
            self.save_recipe(name).await
        }
    }

    pub async fn clear_history(&mut self) -> bool {
        let Some(user_id) = self.state.profile.as_ref().map(|p| p.id) else {
            return false;
        };

        match self.services.persistence.clear_history(user_id).await {
            Ok(true) => {
                self.dispatch(Action::HistoryCleared).await;
                true
            }
            _ => false,
        }
    }

    /// Prepares a photo for analysis, or shows why it was rejected.
    pub async fn select_image(&mut self, source: &[u8]) {
        match prepare_image(source) {
            Ok(image) => {
                self.dispatch(Action::Edit(FormEdit::Image(Some(image))))
                    .await
            }
            Err(e) => {
                let message = match e {
                    CoreError::Validation(message) => message,
                    _ => "Failed to process the image.".to_string(),
                };
                self.dispatch(Action::ImageRejected(message)).await
            }
        }
    }

    /// Adds the ingredients of `recipe_name` the user did not provide.
    pub async fn add_missing_to_shopping_list(&mut self, recipe_name: &str) {
        let Some(recipe) = self.state.find_recipe(recipe_name) else {
            return;
        };
        let missing = recipe
            .missing_ingredients()
            .into_iter()
            .map(|i| i.name.clone())
            .collect();

        self.dispatch(Action::AddToShoppingList(missing)).await;
    }

    pub async fn shopping_links(&self) -> Result<Vec<ShoppingLink>, CoreError> {
        self.services
            .ai
            .request_shopping_links(self.state.shopping_list.items())
            .await
    }

    pub fn share_text(&self, recipe_name: &str) -> Option<String> {
        self.state.find_recipe(recipe_name).map(Recipe::to_share_text)
    }
}
