pub mod entities;
pub mod prompts;
pub mod schema;

pub use entities::*;
