use std::collections::BTreeSet;

use crate::domain::{
    food_analysis::value_objects::PreparedImage,
    kitchen::value_objects::RecipeFinderMode,
    menu::value_objects::{Country, FoodStyle, LocationType, find_country},
    recipe::value_objects::{
        CookAge, DEFAULT_SERVINGS, Diet, MaxCookTime, MealType, Occasion, Preference, RecipeFilters,
        SkillLevel,
    },
};

pub const DEFAULT_INGREDIENTS: [&str; 8] = [
    "flour", "water", "oil", "salt", "sugar", "pepper", "onion", "garlic",
];
pub const TIFFIN_DEFAULT_SERVINGS: u32 = 1;
pub const DEFAULT_EVENT_TYPE: &str = "Baby Shower";
pub const DEFAULT_GUEST_COUNT: u32 = 15;
pub const DEFAULT_BUDGET: f64 = 300.0;
pub const DEFAULT_COUNTRY: &str = "India";

/// Ingredients and filters used by both recipe and tiffin modes; menu mode
/// reads cuisine and diet from here too.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedForm {
    pub ingredients: Vec<String>,
    pub cuisine: String,
    pub diet: Diet,
    /// `None` while the input is empty.
    pub servings: Option<u32>,
    pub preferences: BTreeSet<Preference>,
    pub allergies: String,
    pub skill_level: SkillLevel,
    pub cook_age: CookAge,
    pub meal_type: MealType,
    pub include_nutrition: bool,
}

impl Default for SharedForm {
    fn default() -> Self {
        Self {
            ingredients: DEFAULT_INGREDIENTS.iter().map(|i| i.to_string()).collect(),
            cuisine: String::new(),
            diet: Diet::Any,
            servings: Some(DEFAULT_SERVINGS),
            preferences: BTreeSet::new(),
            allergies: String::new(),
            skill_level: SkillLevel::Beginner,
            cook_age: CookAge::Major,
            meal_type: MealType::Any,
            include_nutrition: false,
        }
    }
}

impl SharedForm {
    /// Valid servings count, if any.
    pub fn servings(&self) -> Option<u32> {
        self.servings.filter(|s| *s >= 1)
    }

    pub fn cuisine(&self) -> Option<String> {
        let cuisine = self.cuisine.trim();
        (!cuisine.is_empty()).then(|| cuisine.to_string())
    }

    pub fn filters(&self, servings: u32) -> RecipeFilters {
        RecipeFilters {
            cuisine: self.cuisine(),
            diet: self.diet,
            servings,
            preferences: self.preferences.clone(),
            allergies: self.allergies.trim().to_string(),
            skill_level: self.skill_level,
            cook_age: self.cook_age,
            meal_type: self.meal_type,
            include_nutrition: self.include_nutrition,
        }
    }

    pub fn restore_filters(&mut self, filters: &RecipeFilters) {
        self.cuisine = filters.cuisine.clone().unwrap_or_default();
        self.diet = filters.diet;
        self.servings = Some(filters.servings);
        self.preferences = filters.preferences.clone();
        self.allergies = filters.allergies.clone();
        self.skill_level = filters.skill_level;
        self.cook_age = filters.cook_age;
        self.meal_type = filters.meal_type;
        self.include_nutrition = filters.include_nutrition;
    }

    /// Lower-cases and appends `ingredient` unless blank or already listed.
    pub fn add_ingredient(&mut self, ingredient: &str) -> bool {
        let ingredient = ingredient.trim().to_lowercase();
        if ingredient.is_empty() || self.ingredients.contains(&ingredient) {
            return false;
        }
        self.ingredients.push(ingredient);
        true
    }

    pub fn remove_ingredient(&mut self, ingredient: &str) {
        self.ingredients.retain(|i| i != ingredient);
    }

    pub fn toggle_preference(&mut self, preference: Preference) {
        if !self.preferences.remove(&preference) {
            self.preferences.insert(preference);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub finder_mode: RecipeFinderMode,
    pub recipe_query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TiffinForm {
    pub max_cook_time: MaxCookTime,
    pub occasion: Occasion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuForm {
    pub event_type: String,
    pub guest_count: Option<u32>,
    pub budget: Option<f64>,
    pub country: String,
    pub location_type: LocationType,
    pub food_style: FoodStyle,
}

impl Default for MenuForm {
    fn default() -> Self {
        Self {
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            guest_count: Some(DEFAULT_GUEST_COUNT),
            budget: Some(DEFAULT_BUDGET),
            country: DEFAULT_COUNTRY.to_string(),
            location_type: LocationType::Metro,
            food_style: FoodStyle::Unpacked,
        }
    }
}

impl MenuForm {
    pub fn selected_country(&self) -> &'static Country {
        find_country(&self.country)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescueForm {
    pub dish_name: String,
    pub problem: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisionForm {
    pub image: Option<PreparedImage>,
    pub user_context: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forms {
    pub shared: SharedForm,
    pub recipe: RecipeForm,
    pub tiffin: TiffinForm,
    pub menu: MenuForm,
    pub rescue: RescueForm,
    pub vision: VisionForm,
}

/// A single field change coming from the form UI.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    Cuisine(String),
    Diet(Diet),
    Servings(Option<u32>),
    Allergies(String),
    SkillLevel(SkillLevel),
    CookAge(CookAge),
    MealType(MealType),
    IncludeNutrition(bool),
    RecipeQuery(String),
    MaxCookTime(MaxCookTime),
    Occasion(Occasion),
    EventType(String),
    GuestCount(Option<u32>),
    Budget(Option<f64>),
    Country(String),
    LocationType(LocationType),
    FoodStyle(FoodStyle),
    RescueDishName(String),
    RescueProblem(String),
    Image(Option<PreparedImage>),
    VisionUserContext(String),
}

impl Forms {
    pub fn apply(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::Cuisine(v) => self.shared.cuisine = v,
            FormEdit::Diet(v) => self.shared.diet = v,
            FormEdit::Servings(v) => self.shared.servings = v,
            FormEdit::Allergies(v) => self.shared.allergies = v,
            FormEdit::SkillLevel(v) => self.shared.skill_level = v,
            FormEdit::CookAge(v) => self.shared.cook_age = v,
            FormEdit::MealType(v) => self.shared.meal_type = v,
            FormEdit::IncludeNutrition(v) => self.shared.include_nutrition = v,
            FormEdit::RecipeQuery(v) => self.recipe.recipe_query = v,
            FormEdit::MaxCookTime(v) => self.tiffin.max_cook_time = v,
            FormEdit::Occasion(v) => self.tiffin.occasion = v,
            FormEdit::EventType(v) => self.menu.event_type = v,
            FormEdit::GuestCount(v) => self.menu.guest_count = v,
            FormEdit::Budget(v) => self.menu.budget = v,
            FormEdit::Country(v) => self.menu.country = v,
            FormEdit::LocationType(v) => self.menu.location_type = v,
            FormEdit::FoodStyle(v) => self.menu.food_style = v,
            FormEdit::RescueDishName(v) => self.rescue.dish_name = v,
            FormEdit::RescueProblem(v) => self.rescue.problem = v,
            FormEdit::Image(v) => self.vision.image = v,
            FormEdit::VisionUserContext(v) => self.vision.user_context = v,
        }
    }
}
