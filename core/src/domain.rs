pub mod account;
pub mod common;
pub mod food_analysis;
pub mod generation;
pub mod history;
pub mod kitchen;
pub mod menu;
pub mod persistence;
pub mod proxy;
pub mod recipe;
pub mod rescue;
pub mod saved_recipe;
pub mod shopping;
