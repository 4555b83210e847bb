use reqwest::Method;
use tracing::warn;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError, recipe::entities::Recipe,
        saved_recipe::ports::SavedRecipeRepository,
    },
    infrastructure::supabase::{
        client::{RETURN_REPRESENTATION, SupabaseClient, eq},
        mappers::{IdRow, SavedRecipeInsert, SavedRecipeRow},
    },
};

const TABLE: &str = "saved_recipes";

#[derive(Debug, Clone)]
pub struct SupabaseSavedRecipeRepository {
    pub client: SupabaseClient,
}

impl SupabaseSavedRecipeRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl SavedRecipeRepository for SupabaseSavedRecipeRepository {
    async fn save(&self, user_id: Uuid, recipe: Recipe) -> Result<String, CoreError> {
        let url = self.client.rest_url(TABLE);
        let request = self
            .client
            .request(Method::POST, &url)
            .await
            .query(&[("select", "id")])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&SavedRecipeInsert {
                user_id,
                recipe_data: &recipe,
            });

        let rows: Vec<IdRow> = self.client.send_json(request, "save recipe").await?;
        rows.into_iter()
            .next()
            .map(|row| row.id.to_string())
            .ok_or(CoreError::NotFound)
    }

    async fn delete(&self, record_id: String) -> Result<(), CoreError> {
        let url = self.client.rest_url(TABLE);
        let request = self
            .client
            .request(Method::DELETE, &url)
            .await
            .query(&[("id", eq(record_id))]);

        self.client.send(request, "unsave recipe").await?;
        Ok(())
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<Recipe>, CoreError> {
        let url = self.client.rest_url(TABLE);
        let request = self.client.request(Method::GET, &url).await.query(&[
            ("select", "id,recipe_data".to_string()),
            ("user_id", eq(user_id)),
            ("order", "created_at.desc".to_string()),
        ]);

        let rows: Vec<SavedRecipeRow> = self.client.send_json(request, "fetch saved recipes").await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.to_string();
                Recipe::try_from(row)
                    .map_err(|e| warn!("Skipping unreadable saved recipe {}: {}", id, e))
                    .ok()
            })
            .collect())
    }
}
