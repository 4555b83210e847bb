pub mod auth_repository;
pub mod history_repository;
pub mod profile_repository;
pub mod saved_recipe_repository;
