//! Merges both buckets into one alphabetical shopping list.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::aggregate::{AggregatedIngredient, BucketKind, Buckets};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingItem {
    /// Display key: the ingredient name, suffixed when it is also in the other bucket.
    pub key: String,
    pub bucket: BucketKind,
    #[serde(flatten)]
    pub ingredient: AggregatedIngredient,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
    spices: BTreeSet<String>,
}

impl ShoppingList {
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn get(&self, key: &str) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.key.as_str()).collect()
    }

    pub fn spices(&self) -> &BTreeSet<String> {
        &self.spices
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.spices.is_empty()
    }
}

/// Builds the display list.
///
/// A name present in both buckets keeps its convertible entry under the plain
/// name; the non-convertible entry gets `marker` appended (repeated until the
/// key is unused). The two amounts are never combined.
pub fn assemble(buckets: &Buckets, spices: &BTreeSet<String>, marker: &str) -> ShoppingList {
    let marker = if marker.is_empty() { "_" } else { marker };
    let convertible = buckets.bucket(BucketKind::Convertible);
    let non_convertible = buckets.bucket(BucketKind::NonConvertible);
    let names: BTreeSet<&String> = convertible.keys().chain(non_convertible.keys()).collect();

    let mut taken: HashSet<String> = names.iter().map(|name| name.to_string()).collect();
    let mut items = Vec::with_capacity(buckets.len());
    for name in names {
        let mut suffix = String::new();
        for (kind, bucket) in [
            (BucketKind::Convertible, convertible),
            (BucketKind::NonConvertible, non_convertible),
        ] {
            let Some(ingredient) = bucket.get(name) else {
                continue;
            };
            let key = if suffix.is_empty() {
                name.clone()
            } else {
                let mut key = format!("{name}{suffix}");
                while taken.contains(&key) {
                    key.push_str(marker);
                }
                taken.insert(key.clone());
                key
            };
            items.push(ShoppingItem {
                key,
                bucket: kind,
                ingredient: ingredient.clone(),
            });
            suffix.push_str(marker);
        }
    }

    ShoppingList {
        items,
        spices: spices.clone(),
    }
}
