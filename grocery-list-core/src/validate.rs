//! Structural and content checks for a raw recipe document.
//!
//! Every recipe is scanned, and every problem found is collected into a
//! [`ValidationReport`]. Diagnostics are grouped per recipe, and ingredient
//! problems are grouped again per ingredient. A recipe with no problems
//! contributes nothing to the report. Typed [`Recipe`]s are produced only
//! when the whole document is clean.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde_json::{Map, Value};
use tracing::{error, info};

use crate::case::{check_case, CaseStyle, CaseViolation};
use crate::error::ValidationError;
use crate::recipe::{IngredientLine, Quantity, Recipe, RecipeBook, RECIPE_FIELDS};
use crate::units::UnitCatalog;

const INGREDIENT_KEYS: [&str; 2] = ["amount", "unit"];

#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    MissingRecipes,
    NotAMapping { what: String },
    KeySet {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    InvalidName,
    DuplicateName(String),
    NotNumeric { field: String, value: String },
    NotAString { field: String },
    NotLowercase { field: String, value: String },
    NotAList { field: String },
    InvalidSpice(String),
    Case(CaseViolation),
    InvalidKeyName(String),
    MissingKey(String),
    InvalidUnitName(String),
    InvalidAmountType(String),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::MissingRecipes => write!(f, "Document must contain a `recipes` list"),
            Problem::NotAMapping { what } => write!(f, "Expected a mapping for {what}"),
            Problem::KeySet {
                missing,
                unexpected,
            } => {
                write!(f, "Recipe keys are incomplete/invalid!")?;
                if !missing.is_empty() {
                    write!(f, " Missing: [{}]", missing.join(", "))?;
                }
                if !unexpected.is_empty() {
                    write!(f, " Unexpected: [{}]", unexpected.join(", "))?;
                }
                Ok(())
            }
            Problem::InvalidName => write!(f, "Recipe name must be a non-empty string"),
            Problem::DuplicateName(name) => write!(f, "Duplicate recipe name: {name}"),
            Problem::NotNumeric { field, value } => {
                write!(f, "Invalid number for {field}: {value}")
            }
            Problem::NotAString { field } => write!(f, "Expected a string for {field}"),
            Problem::NotLowercase { field, value } => {
                write!(f, "Invalid Case for {field}: {value}")
            }
            Problem::NotAList { field } => write!(f, "Expected a list for {field}"),
            Problem::InvalidSpice(value) => write!(f, "List check failed for {value}"),
            Problem::Case(violation) => write!(f, "{violation}"),
            Problem::InvalidKeyName(key) => write!(f, "Invalid key name: {key}"),
            Problem::MissingKey(key) => write!(f, "Missing key: {key}"),
            Problem::InvalidUnitName(unit) => write!(f, "Invalid unit name: {unit}"),
            Problem::InvalidAmountType(kind) => write!(f, "Invalid amount type: {kind}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientDiagnostics {
    pub ingredient: String,
    pub problems: Vec<Problem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDiagnostics {
    /// Recipe name, or `#<position>` when the name is unusable.
    pub recipe: String,
    pub problems: Vec<Problem>,
    pub ingredients: Vec<IngredientDiagnostics>,
}

impl RecipeDiagnostics {
    fn new(recipe: String) -> Self {
        Self {
            recipe,
            problems: Vec::new(),
            ingredients: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.problems.is_empty() && self.ingredients.is_empty()
    }

    pub fn problem_count(&self) -> usize {
        self.problems.len()
            + self
                .ingredients
                .iter()
                .map(|i| i.problems.len())
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Problems with the document itself rather than any one recipe.
    pub document: Vec<Problem>,
    pub recipes: Vec<RecipeDiagnostics>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.document.is_empty() && self.recipes.is_empty()
    }

    pub fn problem_count(&self) -> usize {
        self.document.len()
            + self
                .recipes
                .iter()
                .map(RecipeDiagnostics::problem_count)
                .sum::<usize>()
    }

    pub fn recipe(&self, name: &str) -> Option<&RecipeDiagnostics> {
        self.recipes.iter().find(|r| r.recipe == name)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for problem in &self.document {
            writeln!(f, "{problem}")?;
        }
        for recipe in &self.recipes {
            writeln!(f, "Recipe: {}", recipe.recipe)?;
            for problem in &recipe.problems {
                writeln!(f, "    {problem}")?;
            }
            for ingredient in &recipe.ingredients {
                writeln!(f, "  Ingredient: {}", ingredient.ingredient)?;
                for problem in &ingredient.problems {
                    writeln!(f, "    {problem}")?;
                }
            }
        }
        Ok(())
    }
}

/// Result of a full scan: the report, plus the typed recipes when it is clean.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked {
    pub report: ValidationReport,
    pub recipes: Vec<Recipe>,
}

pub struct Validator<'a> {
    units: &'a UnitCatalog,
}

impl<'a> Validator<'a> {
    pub fn new(units: &'a UnitCatalog) -> Self {
        Self { units }
    }

    /// Validates and, on success, returns the typed recipe collection.
    pub fn validate(&self, document: &Value) -> Result<RecipeBook, ValidationError> {
        let checked = self.check(document);
        if checked.report.is_clean() {
            info!(recipes = checked.recipes.len(), "Recipe list passed validation");
            Ok(RecipeBook::new(checked.recipes))
        } else {
            error!(
                problems = checked.report.problem_count(),
                invalid_recipes = checked.report.recipes.len(),
                "Recipe list failed validation"
            );
            Err(ValidationError {
                report: checked.report,
            })
        }
    }

    /// Scans the whole document. Never stops at the first invalid recipe.
    pub fn check(&self, document: &Value) -> Checked {
        let mut report = ValidationReport::default();
        let mut recipes = Vec::new();

        let Some(entries) = document.get("recipes").and_then(Value::as_array) else {
            report.document.push(Problem::MissingRecipes);
            return Checked { report, recipes };
        };

        let mut seen_names = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let (mut diagnostics, recipe) = self.check_recipe(index, entry);
            if let Some(name) = entry.get("name").and_then(Value::as_str) {
                if !seen_names.insert(name.to_lowercase()) {
                    diagnostics
                        .problems
                        .push(Problem::DuplicateName(name.to_string()));
                }
            }
            if diagnostics.is_clean() {
                recipes.extend(recipe);
            } else {
                report.recipes.push(diagnostics);
            }
        }

        if !report.is_clean() {
            recipes.clear();
        }
        Checked { report, recipes }
    }

    fn check_recipe(&self, index: usize, entry: &Value) -> (RecipeDiagnostics, Option<Recipe>) {
        let label = entry
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index + 1));
        let mut diag = RecipeDiagnostics::new(label);

        let Some(fields) = entry.as_object() else {
            diag.problems.push(Problem::NotAMapping {
                what: "recipe".to_string(),
            });
            return (diag, None);
        };

        check_key_set(fields, &mut diag);

        let name = fields.get("name").and_then(|value| {
            let name = value.as_str().filter(|n| !n.trim().is_empty());
            if name.is_none() {
                diag.problems.push(Problem::InvalidName);
            }
            name
        });
        let rating = fields
            .get("rating")
            .and_then(|value| number_field("rating", value, &mut diag));
        let servings = fields
            .get("servings")
            .and_then(|value| number_field("servings", value, &mut diag));
        let url = fields
            .get("url")
            .and_then(|value| lowercase_field("url", value, &mut diag));
        let category = fields
            .get("category")
            .and_then(|value| lowercase_field("category", value, &mut diag));
        let spices = fields
            .get("spices")
            .and_then(|value| spice_list(value, &mut diag));
        let ingredients = fields
            .get("ingredients")
            .and_then(|value| self.ingredient_list(value, &mut diag));

        if !diag.is_clean() {
            return (diag, None);
        }
        let recipe = match (name, rating, servings, url, category, spices, ingredients) {
            (
                Some(name),
                Some(rating),
                Some(servings),
                Some(url),
                Some(category),
                Some(spices),
                Some(ingredients),
            ) => Some(Recipe {
                name: name.to_string(),
                ingredients,
                rating,
                spices,
                url: url.to_string(),
                category: category.to_string(),
                servings,
            }),
            _ => None,
        };
        (diag, recipe)
    }

    fn ingredient_list(
        &self,
        value: &Value,
        diag: &mut RecipeDiagnostics,
    ) -> Option<Vec<IngredientLine>> {
        let Some(entries) = value.as_array() else {
            diag.problems.push(Problem::NotAList {
                field: "ingredients".to_string(),
            });
            return None;
        };

        let mut lines = Vec::new();
        for (position, entry) in entries.iter().enumerate() {
            let Some(entry) = entry.as_object() else {
                diag.problems.push(Problem::NotAMapping {
                    what: format!("ingredient entry #{}", position + 1),
                });
                continue;
            };
            for (name, details) in entry {
                let mut problems = Vec::new();
                let quantity = self.check_ingredient(name, details, &mut problems);
                if problems.is_empty() {
                    lines.extend(quantity.map(|quantity| IngredientLine {
                        name: name.clone(),
                        quantity,
                    }));
                } else {
                    diag.ingredients.push(IngredientDiagnostics {
                        ingredient: name.clone(),
                        problems,
                    });
                }
            }
        }
        Some(lines)
    }

    fn check_ingredient(
        &self,
        name: &str,
        details: &Value,
        problems: &mut Vec<Problem>,
    ) -> Option<Quantity> {
        if let Err(violation) = check_case(name, CaseStyle::Lower) {
            problems.push(Problem::Case(violation));
        }
        let Some(details) = details.as_object() else {
            problems.push(Problem::NotAMapping {
                what: "ingredient amount and unit".to_string(),
            });
            return None;
        };

        for key in details.keys() {
            if !INGREDIENT_KEYS.contains(&key.as_str()) {
                problems.push(Problem::InvalidKeyName(key.clone()));
            }
        }

        let unit = match details.get("unit") {
            Some(Value::String(unit)) if self.units.is_recognized(unit) => Some(unit.clone()),
            Some(Value::String(unit)) => {
                problems.push(Problem::InvalidUnitName(unit.clone()));
                None
            }
            Some(other) => {
                problems.push(Problem::InvalidUnitName(other.to_string()));
                None
            }
            None => {
                problems.push(Problem::MissingKey("unit".to_string()));
                None
            }
        };
        let amount = match details.get("amount") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(other) => {
                problems.push(Problem::InvalidAmountType(json_kind(other).to_string()));
                None
            }
            None => {
                problems.push(Problem::MissingKey("amount".to_string()));
                None
            }
        };

        Some(Quantity {
            amount: amount?,
            unit: unit?,
        })
    }
}

fn check_key_set(fields: &Map<String, Value>, diag: &mut RecipeDiagnostics) {
    let present: BTreeSet<&str> = fields.keys().map(String::as_str).collect();
    let required: BTreeSet<&str> = RECIPE_FIELDS.iter().copied().collect();
    if present == required {
        return;
    }
    diag.problems.push(Problem::KeySet {
        missing: required.difference(&present).map(|k| k.to_string()).collect(),
        unexpected: present.difference(&required).map(|k| k.to_string()).collect(),
    });
}

/// Numbers pass as-is; strings are coerced. Anything else is a problem.
fn number_field(field: &str, value: &Value, diag: &mut RecipeDiagnostics) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    };
    if number.is_none() {
        diag.problems.push(Problem::NotNumeric {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    number
}

fn lowercase_field<'v>(
    field: &str,
    value: &'v Value,
    diag: &mut RecipeDiagnostics,
) -> Option<&'v str> {
    let Some(text) = value.as_str() else {
        diag.problems.push(Problem::NotAString {
            field: field.to_string(),
        });
        return None;
    };
    match check_case(text, CaseStyle::Lower) {
        Ok(()) => Some(text),
        Err(_) => {
            diag.problems.push(Problem::NotLowercase {
                field: field.to_string(),
                value: text.to_string(),
            });
            None
        }
    }
}

fn spice_list(value: &Value, diag: &mut RecipeDiagnostics) -> Option<BTreeSet<String>> {
    let Some(items) = value.as_array() else {
        diag.problems.push(Problem::NotAList {
            field: "spices".to_string(),
        });
        return None;
    };
    let mut spices = BTreeSet::new();
    let mut clean = true;
    for item in items {
        match item {
            Value::Number(n) => {
                spices.insert(n.to_string());
            }
            Value::String(s) if check_case(s, CaseStyle::Lower).is_ok() => {
                spices.insert(s.clone());
            }
            Value::String(s) => {
                diag.problems.push(Problem::InvalidSpice(s.clone()));
                clean = false;
            }
            other => {
                diag.problems.push(Problem::InvalidSpice(other.to_string()));
                clean = false;
            }
        }
    }
    clean.then_some(spices)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
