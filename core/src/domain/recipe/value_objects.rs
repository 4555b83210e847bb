use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diet {
    #[default]
    Any,
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
}

impl Diet {
    pub fn as_str(&self) -> &str {
        match self {
            Diet::Any => "Any",
            Diet::Vegetarian => "Vegetarian",
            Diet::NonVegetarian => "Non-Vegetarian",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Moderate,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Moderate => "Moderate",
            SkillLevel::Expert => "Expert",
        }
    }
}

/// Age bracket of whoever is cooking. `Minor` switches on the safety clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CookAge {
    #[default]
    Major,
    Minor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    #[default]
    Any,
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &str {
        match self {
            MealType::Any => "Any",
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Preference {
    #[serde(rename = "Gluten-Free")]
    GlutenFree,
    #[serde(rename = "High Protein")]
    HighProtein,
    #[serde(rename = "Kid-Friendly")]
    KidFriendly,
    #[serde(rename = "Less Oily")]
    LessOily,
    #[serde(rename = "Less Salty")]
    LessSalty,
    #[serde(rename = "Low Carb")]
    LowCarb,
    #[serde(rename = "Non-Spicy")]
    NonSpicy,
    #[serde(rename = "Quick & Easy")]
    QuickAndEasy,
    Spicy,
}

impl Preference {
    pub const ALL: [Preference; 9] = [
        Preference::GlutenFree,
        Preference::HighProtein,
        Preference::KidFriendly,
        Preference::LessOily,
        Preference::LessSalty,
        Preference::LowCarb,
        Preference::NonSpicy,
        Preference::QuickAndEasy,
        Preference::Spicy,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Preference::GlutenFree => "Gluten-Free",
            Preference::HighProtein => "High Protein",
            Preference::KidFriendly => "Kid-Friendly",
            Preference::LessOily => "Less Oily",
            Preference::LessSalty => "Less Salty",
            Preference::LowCarb => "Low Carb",
            Preference::NonSpicy => "Non-Spicy",
            Preference::QuickAndEasy => "Quick & Easy",
            Preference::Spicy => "Spicy",
        }
    }
}

/// Filters shared by every recipe-producing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFilters {
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub diet: Diet,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub preferences: BTreeSet<Preference>,
    #[serde(default)]
    pub allergies: String,
    #[serde(default, alias = "cookLevel")]
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub cook_age: CookAge,
    #[serde(default)]
    pub meal_type: MealType,
    #[serde(default, alias = "showCalories")]
    pub include_nutrition: bool,
}

pub const DEFAULT_SERVINGS: u32 = 2;

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

impl Default for RecipeFilters {
    fn default() -> Self {
        Self {
            cuisine: None,
            diet: Diet::Any,
            servings: DEFAULT_SERVINGS,
            preferences: BTreeSet::new(),
            allergies: String::new(),
            skill_level: SkillLevel::Beginner,
            cook_age: CookAge::Major,
            meal_type: MealType::Any,
            include_nutrition: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientsRecipeInput {
    pub ingredients: Vec<String>,
    pub filters: RecipeFilters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRecipeInput {
    pub dish_name: String,
    pub filters: RecipeFilters,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxCookTime {
    #[serde(rename = "15")]
    Fifteen,
    #[default]
    #[serde(rename = "30")]
    Thirty,
    #[serde(rename = "45")]
    FortyFive,
}

impl MaxCookTime {
    pub fn minutes(&self) -> u32 {
        match self {
            MaxCookTime::Fifteen => 15,
            MaxCookTime::Thirty => 30,
            MaxCookTime::FortyFive => 45,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occasion {
    #[default]
    #[serde(rename = "Work Lunch")]
    WorkLunch,
    #[serde(rename = "School Lunch")]
    SchoolLunch,
    Picnic,
}

impl Occasion {
    pub fn as_str(&self) -> &str {
        match self {
            Occasion::WorkLunch => "Work Lunch",
            Occasion::SchoolLunch => "School Lunch",
            Occasion::Picnic => "Picnic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiffinInput {
    pub max_cook_time: MaxCookTime,
    pub occasion: Occasion,
    pub ingredients: Vec<String>,
    pub filters: RecipeFilters,
}
