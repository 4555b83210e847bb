pub mod client;
pub mod mappers;
pub mod repositories;

pub use client::SupabaseClient;
pub use repositories::{
    auth_repository::SupabaseAuthRepository, history_repository::SupabaseHistoryRepository,
    profile_repository::SupabaseProfileRepository,
    saved_recipe_repository::SupabaseSavedRecipeRepository,
};
