//! Ad-hoc items typed in by the user rather than taken from a recipe.

use serde::Serialize;

use crate::case::{lint_case, CaseStyle};
use crate::error::InputError;
use crate::units::UnitCatalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualItem {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl ManualItem {
    /// Parses `"<amount> <unit>"` for ingredient `name`.
    ///
    /// The amount is the first whitespace-delimited token and the unit the
    /// second. The name is lowercased.
    pub fn parse(name: &str, amount_and_unit: &str, units: &UnitCatalog) -> Result<Self, InputError> {
        let name = lint_case(name.trim(), CaseStyle::Lower);
        if name.is_empty() {
            return Err(InputError::EmptyName);
        }

        let mut tokens = amount_and_unit.split_whitespace();
        let raw_amount = tokens.next().ok_or_else(|| InputError::MissingAmount {
            ingredient: name.clone(),
        })?;
        let amount = raw_amount
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| InputError::InvalidAmount {
                ingredient: name.clone(),
                amount: raw_amount.to_string(),
            })?;
        let unit = tokens.next().ok_or_else(|| InputError::MissingUnit {
            ingredient: name.clone(),
        })?;
        if !units.is_recognized(unit) {
            return Err(InputError::UnknownUnit {
                ingredient: name,
                unit: unit.to_string(),
            });
        }

        Ok(Self {
            name,
            amount,
            unit: unit.to_string(),
        })
    }
}
