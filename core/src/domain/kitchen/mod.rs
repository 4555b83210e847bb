pub mod actions;
pub mod controller;
pub mod forms;
pub mod reducer;
pub mod state;
pub mod validation;
pub mod value_objects;

pub use actions::{Action, Effect};
pub use controller::KitchenController;
pub use reducer::reduce;
pub use state::{KitchenState, Phase, Results};
pub use value_objects::*;
