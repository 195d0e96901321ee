//! Unit vocabulary and the direct-lookup conversion table.
//!
//! Both are plain configuration data: the defaults below reproduce the
//! built-in kitchen tables, and either can be replaced from the config file.
//! The conversion table is directional and partial. It is not checked for
//! symmetry, so converting A→B→A need not return the starting amount.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConversionError};

/// Which slice of the vocabulary to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    All,
    Convertible,
    NonConvertible,
}

impl FromStr for UnitKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(UnitKind::All),
            "convertible" | "convertable" => Ok(UnitKind::Convertible),
            "non-convertible" | "non_convertible" | "nonconvertable" => Ok(UnitKind::NonConvertible),
            other => Err(ConfigError::UnknownUnitKind(other.to_string())),
        }
    }
}

/// The recognised units, split into two disjoint sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCatalog {
    pub convertible: Vec<String>,
    pub non_convertible: Vec<String>,
}

impl Default for UnitCatalog {
    fn default() -> Self {
        let owned = |units: &[&str]| -> Vec<String> { units.iter().map(|u| u.to_string()).collect() };
        Self {
            convertible: owned(&[
                "tsp",
                "tbsp",
                "cup/liquid",
                "cup/solid",
                "oz/liquid",
                "oz/solid",
                "lbs",
            ]),
            non_convertible: owned(&["single", "clove", "bunch", "slice"]),
        }
    }
}

impl UnitCatalog {
    pub fn is_convertible(&self, unit: &str) -> bool {
        self.convertible.iter().any(|u| u == unit)
    }

    pub fn is_recognized(&self, unit: &str) -> bool {
        self.is_convertible(unit) || self.non_convertible.iter().any(|u| u == unit)
    }

    pub fn units(&self, kind: UnitKind) -> Vec<&str> {
        let convertible = self.convertible.iter().map(String::as_str);
        let non_convertible = self.non_convertible.iter().map(String::as_str);
        match kind {
            UnitKind::All => convertible.chain(non_convertible).collect(),
            UnitKind::Convertible => convertible.collect(),
            UnitKind::NonConvertible => non_convertible.collect(),
        }
    }

    /// The two sets must not share a unit, otherwise bucket choice is ambiguous.
    pub fn check(&self) -> Result<(), ConfigError> {
        match self
            .non_convertible
            .iter()
            .find(|unit| self.is_convertible(unit))
        {
            Some(unit) => Err(ConfigError::OverlappingUnit(unit.clone())),
            None => Ok(()),
        }
    }
}

/// `amount_in_target = amount_in_source * table[source][target]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionTable(BTreeMap<String, BTreeMap<String, f64>>);

impl Default for ConversionTable {
    fn default() -> Self {
        let mut table = ConversionTable::empty();
        table.extend_from(
            "oz/solid",
            &[("cup/solid", 0.125), ("tbsp", 2.0), ("tsp", 6.0), ("lbs", 0.0624)],
        );
        table.extend_from(
            "oz/liquid",
            &[
                ("cup/liquid", 0.125),
                ("tbsp", 2.0),
                ("tsp", 6.0),
                ("pint", 1.0 / 16.0),
                ("quart", 1.0 / 64.0),
                ("gallon", 1.0 / 256.0),
            ],
        );
        table.extend_from(
            "cup/solid",
            &[("oz/solid", 8.0), ("tbsp", 16.0), ("tsp", 48.0), ("lbs", 0.5)],
        );
        table.extend_from(
            "cup/liquid",
            &[
                ("oz/liquid", 8.0),
                ("tbsp", 16.0),
                ("tsp", 48.0),
                ("pint", 0.5),
                ("quart", 0.25),
                ("gallon", 0.25 / 4.0),
            ],
        );
        table.extend_from(
            "tbsp",
            &[
                ("cup/solid", 1.0 / 16.0),
                ("cup/liquid", 1.0 / 16.0),
                ("oz/solid", 0.5),
                ("tsp", 3.0),
                ("lbs", 0.0315),
            ],
        );
        table.extend_from(
            "tsp",
            &[
                ("cup/solid", 1.0 / 48.0),
                ("oz/liquid", 1.0 / 48.0),
                ("tbsp", 0.3333),
                ("oz/solid", 0.16667),
                ("lbs", 0.0105),
            ],
        );
        table.extend_from(
            "lbs",
            &[("cup/solid", 2.0), ("tbsp", 32.0), ("tsp", 96.0), ("oz/solid", 16.0)],
        );
        table
    }
}

impl ConversionTable {
    pub fn empty() -> Self {
        ConversionTable(BTreeMap::new())
    }

    /// Adds or overwrites the factors going out of `from`.
    pub fn extend_from(&mut self, from: &str, factors: &[(&str, f64)]) {
        let row = self.0.entry(from.to_string()).or_default();
        for (to, factor) in factors {
            row.insert(to.to_string(), *factor);
        }
    }

    pub fn factor(&self, from: &str, to: &str) -> Option<f64> {
        self.0.get(from).and_then(|row| row.get(to)).copied()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts `amount` from `from` into `to` with a single direct lookup.
    ///
    /// Identical units return the amount untouched. No multi-hop path is tried.
    pub fn convert(
        &self,
        units: &UnitCatalog,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<f64, ConversionError> {
        if !units.is_convertible(to) {
            return Err(ConversionError::UnsupportedTargetUnit {
                unit: to.to_string(),
            });
        }
        if from == to {
            return Ok(amount);
        }
        let factor = self
            .factor(from, to)
            .ok_or_else(|| ConversionError::NoConversionPath {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        let converted = amount * factor;
        debug!(amount, from, to, factor, converted, "Converted amount");
        Ok(converted)
    }
}
