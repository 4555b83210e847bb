pub mod food_analysis;

pub use food_analysis::*;
