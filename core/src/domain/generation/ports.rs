use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{entities::FoodAnalysis, value_objects::FoodAnalysisInput},
    generation::value_objects::{
        GenerateContentParams, GenerateContentResponse, GenerateImagesParams, GeneratedImage,
    },
    menu::{entities::MenuPlan, value_objects::MenuPlanInput},
    recipe::{
        entities::Recipe,
        value_objects::{IngredientsRecipeInput, NamedRecipeInput, TiffinInput},
    },
    rescue::entities::{RecipeFix, RecipeFixInput},
    shopping::entities::ShoppingLink,
};

/// Transport to the generative model provider.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_content(
        &self,
        params: GenerateContentParams,
    ) -> impl Future<Output = Result<GenerateContentResponse, CoreError>> + Send;

    fn generate_images(
        &self,
        params: GenerateImagesParams,
    ) -> impl Future<Output = Result<Vec<GeneratedImage>, CoreError>> + Send;
}

/// Typed generation operations used by the kitchen.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeAiService: Send + Sync {
    fn request_recipes_by_ingredients(
        &self,
        input: IngredientsRecipeInput,
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn request_recipe_by_name(
        &self,
        input: NamedRecipeInput,
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn request_tiffin_recipes(
        &self,
        input: TiffinInput,
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn request_menu_plan(
        &self,
        input: MenuPlanInput,
    ) -> impl Future<Output = Result<MenuPlan, CoreError>> + Send;

    fn request_recipe_fix(
        &self,
        input: RecipeFixInput,
    ) -> impl Future<Output = Result<RecipeFix, CoreError>> + Send;

    fn request_food_analysis(
        &self,
        input: FoodAnalysisInput,
    ) -> impl Future<Output = Result<FoodAnalysis, CoreError>> + Send;

    /// Never fails: returns `None` when no image could be produced.
    fn request_recipe_image(
        &self,
        recipe_name: String,
        description: String,
    ) -> impl Future<Output = Option<String>> + Send;

    fn request_shopping_links(
        &self,
        item_names: Vec<String>,
    ) -> impl Future<Output = Result<Vec<ShoppingLink>, CoreError>> + Send;
}
