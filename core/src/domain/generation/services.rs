use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::FoodAnalysis, prompts::food_analysis_prompt, schema::get_food_analysis_schema,
        value_objects::FoodAnalysisInput,
    },
    generation::{
        ports::{LLMClient, RecipeAiService},
        schema::validate_against_schema,
        value_objects::{
            ContentPart, GenerateContentParams, GenerateImagesParams, GenerationConfig,
            ImageGenerationConfig, InlineData,
        },
    },
    menu::{
        entities::MenuPlan, prompts::menu_plan_prompt, schema::get_menu_plan_schema,
        value_objects::MenuPlanInput,
    },
    recipe::{
        entities::Recipe,
        prompts::{ingredients_prompt, named_recipe_prompt, recipe_image_prompt, tiffin_prompt},
        schema::get_recipe_list_schema,
        value_objects::{IngredientsRecipeInput, NamedRecipeInput, TiffinInput},
    },
    rescue::{
        entities::{RecipeFix, RecipeFixInput},
        prompts::recipe_fix_prompt,
        schema::get_recipe_fix_schema,
    },
    shopping::{entities::ShoppingLink, prompts::shopping_links_prompt},
};

pub const RECIPE_IMAGE_MIME_TYPE: &str = "image/jpeg";
pub const RECIPE_IMAGE_ASPECT_RATIO: &str = "16:9";

/// Turns typed generation requests into prompt + schema calls on an
/// [`LLMClient`] and decodes the answers.
#[derive(Debug, Clone)]
pub struct AiFacade<LLM> {
    llm_client: LLM,
    text_model: String,
    image_model: String,
}

impl<LLM> AiFacade<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, text_model: String, image_model: String) -> Self {
        Self {
            llm_client,
            text_model,
            image_model,
        }
    }

    async fn generate_structured<T>(
        &self,
        contents: Vec<ContentPart>,
        schema: Value,
    ) -> Result<T, CoreError>
    where
        T: DeserializeOwned,
    {
        let params = GenerateContentParams {
            model: self.text_model.clone(),
            contents,
            config: GenerationConfig::structured(schema.clone()),
        };

        let response = self
            .llm_client
            .generate_content(params)
            .await
            .map_err(|e| {
                error!("Failed to generate content: {}", e);
                CoreError::GenerationFailure(e.to_string())
            })?;

        let text = response.text().ok_or_else(|| {
            error!("Model returned an empty response");
            CoreError::GenerationFailure("empty response from model".to_string())
        })?;

        decode_structured(text, &schema)
    }

    async fn generate_recipes(
        &self,
        prompt: String,
        include_nutrition: bool,
    ) -> Result<Vec<Recipe>, CoreError> {
        self.generate_structured(
            vec![ContentPart::Text { text: prompt }],
            get_recipe_list_schema(include_nutrition),
        )
        .await
    }
}

/// Parses model output and checks it against `schema` before decoding.
pub fn decode_structured<T>(raw: &str, schema: &Value) -> Result<T, CoreError>
where
    T: DeserializeOwned,
{
    let value: Value = serde_json::from_str(strip_code_fence(raw)).map_err(|e| {
        error!("Failed to parse model output as JSON: {}", e);
        CoreError::GenerationFailure(format!("invalid JSON: {}", e))
    })?;

    validate_against_schema(&value, schema).map_err(|e| {
        error!("Model output does not match schema: {}", e);
        CoreError::GenerationFailure(format!("schema mismatch at {}", e))
    })?;

    serde_json::from_value(value).map_err(|e| {
        error!("Failed to decode model output: {}", e);
        CoreError::GenerationFailure(e.to_string())
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

/// Keeps `is_provided` only for ingredients the caller actually supplied.
pub fn reconcile_provided(recipes: &mut [Recipe], provided: &[String]) {
    let provided: HashSet<String> = provided.iter().map(|i| i.trim().to_lowercase()).collect();

    for ingredient in recipes.iter_mut().flat_map(|r| r.ingredients.iter_mut()) {
        if ingredient.is_provided && !provided.contains(&ingredient.name.trim().to_lowercase()) {
            ingredient.is_provided = false;
        }
    }
}

/// Rewrites a recipe's servings text when it does not mention `servings`.
pub fn normalize_servings(recipes: &mut [Recipe], servings: u32) {
    let wanted = servings.to_string();

    for recipe in recipes.iter_mut() {
        let mentions = recipe
            .servings
            .split(|c: char| !c.is_ascii_digit())
            .any(|token| token == wanted);

        if !mentions {
            debug!(
                "Normalizing servings '{}' of '{}' to {}",
                recipe.servings, recipe.name, servings
            );
            recipe.servings = format!("{} servings", servings);
        }
    }
}

fn require(condition: bool, message: &str) -> Result<(), CoreError> {
    if condition {
        Ok(())
    } else {
        Err(CoreError::Validation(message.to_string()))
    }
}

impl<LLM> RecipeAiService for AiFacade<LLM>
where
    LLM: LLMClient,
{
    async fn request_recipes_by_ingredients(
        &self,
        input: IngredientsRecipeInput,
    ) -> Result<Vec<Recipe>, CoreError> {
        require(!input.ingredients.is_empty(), "at least one ingredient is required")?;
        require(input.filters.servings > 0, "servings must be positive")?;

        let mut recipes = self
            .generate_recipes(ingredients_prompt(&input), input.filters.include_nutrition)
            .await?;

        reconcile_provided(&mut recipes, &input.ingredients);
        normalize_servings(&mut recipes, input.filters.servings);
        Ok(recipes)
    }

    async fn request_recipe_by_name(
        &self,
        input: NamedRecipeInput,
    ) -> Result<Vec<Recipe>, CoreError> {
        require(!input.dish_name.trim().is_empty(), "dish name is required")?;
        require(input.filters.servings > 0, "servings must be positive")?;

        let mut recipes = self
            .generate_recipes(named_recipe_prompt(&input), input.filters.include_nutrition)
            .await?;

        // A single dish is requested; extra entries are ignored.
        recipes.truncate(1);
        reconcile_provided(&mut recipes, &[]);
        normalize_servings(&mut recipes, input.filters.servings);
        Ok(recipes)
    }

    async fn request_tiffin_recipes(&self, input: TiffinInput) -> Result<Vec<Recipe>, CoreError> {
        require(input.filters.servings > 0, "servings must be positive")?;

        let mut recipes = self
            .generate_recipes(tiffin_prompt(&input), input.filters.include_nutrition)
            .await?;

        reconcile_provided(&mut recipes, &input.ingredients);
        normalize_servings(&mut recipes, input.filters.servings);
        Ok(recipes)
    }

    async fn request_menu_plan(&self, input: MenuPlanInput) -> Result<MenuPlan, CoreError> {
        require(!input.event_type.trim().is_empty(), "event type is required")?;
        require(input.guest_count > 0, "guest count must be positive")?;
        require(
            input.budget.is_finite() && input.budget > 0.0,
            "budget must be positive",
        )?;

        self.generate_structured(
            vec![ContentPart::Text {
                text: menu_plan_prompt(&input),
            }],
            get_menu_plan_schema(),
        )
        .await
    }

    async fn request_recipe_fix(&self, input: RecipeFixInput) -> Result<RecipeFix, CoreError> {
        require(
            !input.dish_name.trim().is_empty() && !input.problem.trim().is_empty(),
            "dish name and problem are required",
        )?;

        self.generate_structured(
            vec![ContentPart::Text {
                text: recipe_fix_prompt(&input),
            }],
            get_recipe_fix_schema(),
        )
        .await
    }

    async fn request_food_analysis(
        &self,
        input: FoodAnalysisInput,
    ) -> Result<FoodAnalysis, CoreError> {
        require(!input.image_data.is_empty(), "an image is required")?;

        let contents = vec![
            ContentPart::InlineData {
                inline_data: InlineData {
                    mime_type: input.mime_type.clone(),
                    data: STANDARD.encode(&input.image_data),
                },
            },
            ContentPart::Text {
                text: food_analysis_prompt(&input),
            },
        ];

        self.generate_structured(contents, get_food_analysis_schema())
            .await
    }

    async fn request_recipe_image(&self, recipe_name: String, description: String) -> Option<String> {
        let params = GenerateImagesParams {
            model: self.image_model.clone(),
            prompt: recipe_image_prompt(&recipe_name, &description),
            config: ImageGenerationConfig {
                number_of_images: 1,
                output_mime_type: Some(RECIPE_IMAGE_MIME_TYPE.to_string()),
                aspect_ratio: Some(RECIPE_IMAGE_ASPECT_RATIO.to_string()),
            },
        };

        match self.llm_client.generate_images(params).await {
            Ok(images) => {
                let image = images.into_iter().next();
                if image.is_none() {
                    warn!("No image returned for recipe '{}'", recipe_name);
                }
                image.map(|i| i.data_url(RECIPE_IMAGE_MIME_TYPE))
            }
            Err(e) => {
                warn!("Failed to generate image for recipe '{}': {}", recipe_name, e);
                None
            }
        }
    }

    async fn request_shopping_links(
        &self,
        item_names: Vec<String>,
    ) -> Result<Vec<ShoppingLink>, CoreError> {
        if item_names.is_empty() {
            return Ok(Vec::new());
        }

        let params = GenerateContentParams {
            model: self.text_model.clone(),
            contents: vec![ContentPart::Text {
                text: shopping_links_prompt(&item_names),
            }],
            config: GenerationConfig::grounded_search(),
        };

        let response = self
            .llm_client
            .generate_content(params)
            .await
            .map_err(|e| {
                error!("Failed to search shopping links: {}", e);
                CoreError::GenerationFailure(e.to_string())
            })?;

        Ok(response.grounding_links())
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use crate::domain::{
        common::entities::app_errors::CoreError,
        generation::{
            ports::LLMClient,
            value_objects::{
                GenerateContentParams, GenerateContentResponse, GenerateImagesParams,
                GeneratedImage, GeneratedImageData,
            },
        },
    };

    /// Replays queued text responses and records every call.
    #[derive(Clone, Default)]
    pub struct ScriptedLLM {
        pub texts: Arc<Mutex<VecDeque<Result<String, CoreError>>>>,
        pub content_calls: Arc<Mutex<Vec<GenerateContentParams>>>,
        pub image_calls: Arc<Mutex<Vec<GenerateImagesParams>>>,
        pub failing_image_prompts: Arc<Mutex<Vec<String>>>,
        pub grounded: Arc<Mutex<Option<GenerateContentResponse>>>,
    }

    impl ScriptedLLM {
        pub fn with_texts(texts: Vec<Result<String, CoreError>>) -> Self {
            let llm = Self::default();
            *llm.texts.lock().unwrap() = texts.into();
            llm
        }

        pub fn fail_images_containing(&self, fragment: &str) {
            self.failing_image_prompts
                .lock()
                .unwrap()
                .push(fragment.to_string());
        }

        pub fn content_call_count(&self) -> usize {
            self.content_calls.lock().unwrap().len()
        }
    }

    impl LLMClient for ScriptedLLM {
        async fn generate_content(
            &self,
            params: GenerateContentParams,
        ) -> Result<GenerateContentResponse, CoreError> {
            let grounded = !params.config.tools.is_empty();
            self.content_calls.lock().unwrap().push(params);

            if grounded {
                if let Some(response) = self.grounded.lock().unwrap().clone() {
                    return Ok(response);
                }
            }

            let next = self
                .texts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CoreError::ExternalServiceError("no response".into())));

            next.map(|text| GenerateContentResponse {
                text: Some(text),
                candidates: Vec::new(),
            })
        }

        async fn generate_images(
            &self,
            params: GenerateImagesParams,
        ) -> Result<Vec<GeneratedImage>, CoreError> {
            let fails = self
                .failing_image_prompts
                .lock()
                .unwrap()
                .iter()
                .any(|f| params.prompt.contains(f.as_str()));
            let name = params.prompt.clone();
            self.image_calls.lock().unwrap().push(params);

            if fails {
                return Err(CoreError::ExternalServiceError("image quota".into()));
            }

            Ok(vec![GeneratedImage {
                image: GeneratedImageData {
                    image_bytes: format!("{}", name.len()),
                    mime_type: Some("image/jpeg".to_string()),
                },
            }])
        }
    }
}
