//! Error types for every fallible step of building a shopping list.
//!
//! Fatal conditions (a dataset that fails validation, a conversion that cannot
//! be performed mid-aggregation, irreconcilable units) and per-item failures
//! (a malformed manual item, an unknown recipe name) are kept in separate enums
//! so callers can decide which ones allow a retry.

use std::path::PathBuf;

use crate::validate::ValidationReport;

/// Failure of a single unit conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("unsupported target unit: {unit}")]
    UnsupportedTargetUnit { unit: String },
    #[error("no conversion path from {from} to {to}")]
    NoConversionPath { from: String, to: String },
}

/// Failure while merging one ingredient line into the running totals.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    #[error("error converting units for {ingredient}: {source}")]
    Conversion {
        ingredient: String,
        #[source]
        source: ConversionError,
    },
    #[error("unresolvable unit conflict for {ingredient}: already tracked in {existing}, cannot add {incoming}")]
    UnresolvableUnitConflict {
        ingredient: String,
        existing: String,
        incoming: String,
    },
}

/// Rejection of an ad-hoc item typed in by the user. Never touches existing totals.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("ingredient name must not be empty")]
    EmptyName,
    #[error("missing amount for {ingredient}")]
    MissingAmount { ingredient: String },
    #[error("missing unit for {ingredient}")]
    MissingUnit { ingredient: String },
    #[error("invalid ingredient amount for {ingredient}: {amount}")]
    InvalidAmount { ingredient: String, amount: String },
    #[error("invalid unit supplied for {ingredient}: {unit}")]
    UnknownUnit { ingredient: String, unit: String },
    #[error("no manual item called {ingredient}")]
    UnknownItem { ingredient: String },
}

/// The recipe collection did not pass validation. Carries the full report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("recipe list failed validation with {} problem(s)\n{report}", .report.problem_count())]
pub struct ValidationError {
    pub report: ValidationReport,
}

/// Failure to obtain the raw recipe document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read recipe file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse recipe document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("recipe not found in recipe list: {0}")]
    UnknownRecipe(String),
    #[error("recipe is not selected: {0}")]
    NotSelected(String),
}

/// Inconsistent unit or presentation configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unit {0} is listed as both convertible and non-convertible")]
    OverlappingUnit(String),
    #[error("disambiguation marker must not be empty")]
    EmptyMarker,
    #[error("unknown unit kind: {0} (expected all, convertible or non-convertible)")]
    UnknownUnitKind(String),
    #[error("invalid case type comparison: {0}")]
    UnknownCaseStyle(String),
}

/// Umbrella error for [`crate::session::Session`] operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}
