use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::units::{ConversionTable, UnitCatalog};

/// Reference data the core runs on. Every field falls back to the built-in tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub units: UnitCatalog,
    pub conversions: ConversionTable,
    pub disambiguation_marker: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            units: UnitCatalog::default(),
            conversions: ConversionTable::default(),
            disambiguation_marker: "_".to_string(),
        }
    }
}

impl CoreConfig {
    pub fn check(&self) -> Result<(), ConfigError> {
        self.units.check()?;
        if self.disambiguation_marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(())
    }

    pub fn trace_loaded(&self) {
        info!(
            convertible_units = self.units.convertible.len(),
            non_convertible_units = self.units.non_convertible.len(),
            conversion_factors = self.conversions.len(),
            marker = %self.disambiguation_marker,
            "Loaded core config"
        );
        debug!(?self, "Core config loaded (full debug)");
    }
}

/// Which recipe fields a listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub ingredients: bool,
    /// Show amount and unit next to each ingredient. Needs `ingredients`.
    pub verbose: bool,
    pub rating: bool,
    pub spices: bool,
    pub category: bool,
    pub url: bool,
    pub servings: bool,
}

impl DisplayOptions {
    /// Field-wise OR, used to layer command-line flags over configured defaults.
    pub fn merge(self, other: DisplayOptions) -> DisplayOptions {
        DisplayOptions {
            ingredients: self.ingredients || other.ingredients,
            verbose: self.verbose || other.verbose,
            rating: self.rating || other.rating,
            spices: self.spices || other.spices,
            category: self.category || other.category,
            url: self.url || other.url,
            servings: self.servings || other.servings,
        }
    }
}
