use std::future::Future;
use uuid::Uuid;

use crate::domain::{common::entities::app_errors::CoreError, recipe::entities::Recipe};

#[cfg_attr(test, mockall::automock)]
pub trait SavedRecipeRepository: Send + Sync {
    /// Stores the recipe content and returns the record id.
    fn save(
        &self,
        user_id: Uuid,
        recipe: Recipe,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn delete(&self, record_id: String) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Newest first, each marked saved with its record id attached.
    fn list(&self, user_id: Uuid) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;
}
