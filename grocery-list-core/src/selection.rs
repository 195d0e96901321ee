use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::error::SelectionError;
use crate::recipe::RecipeBook;

/// Outcome of adding a comma-separated list of recipe names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: Vec<String>,
    pub unknown: Vec<String>,
}

/// Recipes chosen for the shopping list, stored by lowercased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects one recipe. Returns whether it was newly added.
    pub fn add(&mut self, book: &RecipeBook, name: &str) -> Result<bool, SelectionError> {
        let recipe = book
            .find(name)
            .ok_or_else(|| SelectionError::UnknownRecipe(name.trim().to_string()))?;
        Ok(self.names.insert(recipe.key()))
    }

    /// Selects every name in a comma-separated list; unknown names are skipped and reported.
    pub fn add_many(&mut self, book: &RecipeBook, names: &str) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match self.add(book, name) {
                Ok(_) => outcome.added.push(name.to_lowercase()),
                Err(_) => {
                    warn!(recipe = name, "Recipe not in recipe list, skipping");
                    outcome.unknown.push(name.to_string());
                }
            }
        }
        info!(added = outcome.added.len(), unknown = outcome.unknown.len(), "Updated selection");
        outcome
    }

    pub fn remove(&mut self, name: &str) -> Result<(), SelectionError> {
        let key = name.trim().to_lowercase();
        if self.names.remove(&key) {
            Ok(())
        } else {
            Err(SelectionError::NotSelected(key))
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.trim().to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}
