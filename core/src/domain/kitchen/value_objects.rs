use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Recipe,
    Tiffin,
    Menu,
    Rescue,
    Vision,
    Saved,
}

impl Mode {
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Recipe => "recipe",
            Mode::Tiffin => "tiffin",
            Mode::Menu => "menu",
            Mode::Rescue => "rescue",
            Mode::Vision => "vision",
            Mode::Saved => "saved",
        }
    }

    /// Modes whose results are recipe cards.
    pub fn produces_recipes(&self) -> bool {
        matches!(self, Mode::Recipe | Mode::Tiffin | Mode::Saved)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeFinderMode {
    #[default]
    Ingredient,
    Name,
}
