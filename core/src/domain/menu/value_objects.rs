use serde::{Deserialize, Serialize};

use crate::domain::recipe::value_objects::Diet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodStyle {
    Packed,
    #[default]
    Unpacked,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationType {
    #[default]
    Metro,
    #[serde(rename = "Non-Metro")]
    NonMetro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    pub currency_code: &'static str,
    pub currency_symbol: &'static str,
}

pub const COUNTRIES: [Country; 7] = [
    Country {
        name: "United States",
        currency_code: "USD",
        currency_symbol: "$",
    },
    Country {
        name: "India",
        currency_code: "INR",
        currency_symbol: "₹",
    },
    Country {
        name: "United Kingdom",
        currency_code: "GBP",
        currency_symbol: "£",
    },
    Country {
        name: "Japan",
        currency_code: "JPY",
        currency_symbol: "¥",
    },
    Country {
        name: "Canada",
        currency_code: "CAD",
        currency_symbol: "$",
    },
    Country {
        name: "Australia",
        currency_code: "AUD",
        currency_symbol: "$",
    },
    Country {
        name: "Germany (Eurozone)",
        currency_code: "EUR",
        currency_symbol: "€",
    },
];

/// Looks a country up by display name, falling back to the first entry.
pub fn find_country(name: &str) -> &'static Country {
    COUNTRIES
        .iter()
        .find(|c| c.name == name)
        .unwrap_or(&COUNTRIES[0])
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuPlanInput {
    pub event_type: String,
    pub guest_count: u32,
    pub budget: f64,
    pub cuisine: Option<String>,
    pub diet: Diet,
    pub country_name: String,
    pub currency_code: String,
    pub food_style: FoodStyle,
    pub location_type: LocationType,
}
