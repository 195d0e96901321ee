//! Running ingredient totals, split into convertible and non-convertible buckets.
//!
//! The bucket an ingredient line lands in depends only on that line's unit.
//! Same-named lines in the convertible bucket are converted into the unit
//! already stored there; same-named lines in the non-convertible bucket must
//! share a unit, since a bunch cannot be added to a clove.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, error};

use crate::error::AggregateError;
use crate::recipe::Recipe;
use crate::units::{ConversionTable, UnitCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    Convertible,
    NonConvertible,
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKind::Convertible => f.write_str("convertible"),
            BucketKind::NonConvertible => f.write_str("non-convertible"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    convertible: BTreeMap<String, AggregatedIngredient>,
    non_convertible: BTreeMap<String, AggregatedIngredient>,
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, kind: BucketKind) -> &BTreeMap<String, AggregatedIngredient> {
        match kind {
            BucketKind::Convertible => &self.convertible,
            BucketKind::NonConvertible => &self.non_convertible,
        }
    }

    fn bucket_mut(&mut self, kind: BucketKind) -> &mut BTreeMap<String, AggregatedIngredient> {
        match kind {
            BucketKind::Convertible => &mut self.convertible,
            BucketKind::NonConvertible => &mut self.non_convertible,
        }
    }

    pub fn get(&self, kind: BucketKind, name: &str) -> Option<&AggregatedIngredient> {
        self.bucket(kind).get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.convertible.is_empty() && self.non_convertible.is_empty()
    }

    pub fn len(&self) -> usize {
        self.convertible.len() + self.non_convertible.len()
    }

    pub fn clear(&mut self) {
        self.convertible.clear();
        self.non_convertible.clear();
    }
}

/// Merges ingredient lines into [`Buckets`] using the configured units and factors.
pub struct Aggregator<'a> {
    units: &'a UnitCatalog,
    table: &'a ConversionTable,
}

impl<'a> Aggregator<'a> {
    pub fn new(units: &'a UnitCatalog, table: &'a ConversionTable) -> Self {
        Self { units, table }
    }

    pub fn bucket_for(&self, unit: &str) -> BucketKind {
        if self.units.is_convertible(unit) {
            BucketKind::Convertible
        } else {
            BucketKind::NonConvertible
        }
    }

    /// Adds one line to its bucket. On error the buckets are left untouched.
    pub fn aggregate(
        &self,
        buckets: &mut Buckets,
        name: &str,
        amount: f64,
        unit: &str,
    ) -> Result<BucketKind, AggregateError> {
        let kind = self.bucket_for(unit);
        let bucket = buckets.bucket_mut(kind);

        let Some(existing) = bucket.get_mut(name) else {
            debug!(ingredient = name, amount, unit, bucket = %kind, "New ingredient");
            bucket.insert(
                name.to_string(),
                AggregatedIngredient {
                    name: name.to_string(),
                    amount,
                    unit: unit.to_string(),
                },
            );
            return Ok(kind);
        };

        if existing.unit == unit {
            existing.amount += amount;
            debug!(ingredient = name, total = existing.amount, unit, "Summed ingredient");
            return Ok(kind);
        }

        match kind {
            BucketKind::Convertible => {
                let converted = self
                    .table
                    .convert(self.units, amount, unit, &existing.unit)
                    .map_err(|source| {
                        error!(ingredient = name, from = unit, to = %existing.unit, error = %source, "Conversion failed");
                        AggregateError::Conversion {
                            ingredient: name.to_string(),
                            source,
                        }
                    })?;
                existing.amount += converted;
                debug!(
                    ingredient = name,
                    added = converted,
                    total = existing.amount,
                    unit = %existing.unit,
                    "Converted and summed ingredient"
                );
                Ok(kind)
            }
            BucketKind::NonConvertible => {
                error!(ingredient = name, existing = %existing.unit, incoming = unit, "Unresolvable unit conflict");
                Err(AggregateError::UnresolvableUnitConflict {
                    ingredient: name.to_string(),
                    existing: existing.unit.clone(),
                    incoming: unit.to_string(),
                })
            }
        }
    }

    /// Adds every ingredient line of `recipe`, stopping at the first failure.
    pub fn aggregate_recipe(
        &self,
        buckets: &mut Buckets,
        recipe: &Recipe,
    ) -> Result<(), AggregateError> {
        for line in &recipe.ingredients {
            self.aggregate(buckets, &line.name, line.quantity.amount, &line.quantity.unit)?;
        }
        Ok(())
    }
}
