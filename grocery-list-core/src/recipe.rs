//! Typed recipe data, produced only by the validator.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The exact set of fields a recipe object carries.
pub const RECIPE_FIELDS: [&str; 7] = [
    "name",
    "ingredients",
    "rating",
    "spices",
    "url",
    "category",
    "servings",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: f64,
    pub unit: String,
}

/// One `name → {amount, unit}` line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientLine {
    pub name: String,
    #[serde(flatten)]
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<IngredientLine>,
    pub rating: f64,
    pub spices: BTreeSet<String>,
    pub url: String,
    pub category: String,
    pub servings: f64,
}

impl Recipe {
    /// Lowercased name, the identifier used by selections.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// The validated, read-only recipe collection of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Recipe> {
        let wanted = name.trim().to_lowercase();
        self.recipes.iter().find(|r| r.key() == wanted)
    }

    pub fn names(&self) -> Vec<&str> {
        self.recipes.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn with_min_rating(&self, min: f64) -> Vec<&Recipe> {
        self.matching(Some(min), None)
    }

    pub fn in_category(&self, category: &str) -> Vec<&Recipe> {
        self.matching(None, Some(category))
    }

    /// Recipes rated at least `min_rating` and in `category`
    /// (case-insensitive); `None` skips that filter.
    pub fn matching(&self, min_rating: Option<f64>, category: Option<&str>) -> Vec<&Recipe> {
        let category = category.map(|c| c.trim().to_lowercase());
        self.recipes
            .iter()
            .filter(|r| min_rating.map_or(true, |min| r.rating >= min))
            .filter(|r| category.as_ref().map_or(true, |c| &r.category == c))
            .collect()
    }
}
