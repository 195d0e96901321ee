//! One shopping session: a validated recipe book plus everything the user has
//! chosen so far.
//!
//! # Lifecycle
//! - [`Session::open`] loads and validates the document. A failed validation
//!   is fatal: no session exists without a clean recipe book.
//! - Recipes are selected and deselected; manual items are added and removed.
//! - [`Session::prepare`] rebuilds the buckets and the spice set from the
//!   current selection and the recorded manual items. Calling it again gives
//!   the same totals.
//! - [`Session::shopping_list`] assembles the display list.
//! - [`Session::clear`] resets everything except the recipe book.
//!
//! # Errors
//! Aggregation is all-or-nothing per call: `prepare` and `add_item` rebuild
//! the totals into fresh buckets and only keep them on success.

use std::collections::BTreeSet;

use tracing::{error, info, warn};

use crate::aggregate::{Aggregator, Buckets};
use crate::assemble::{assemble, ShoppingList};
use crate::config::CoreConfig;
use crate::contract::RecipeSource;
use crate::case::{lint_case, CaseStyle};
use crate::error::{AggregateError, InputError, SelectionError, SessionError};
use crate::manual::ManualItem;
use crate::recipe::{Recipe, RecipeBook};
use crate::selection::{AddOutcome, Selection};
use crate::validate::Validator;

#[derive(Debug, Clone)]
pub struct Session {
    config: CoreConfig,
    book: RecipeBook,
    selection: Selection,
    manual_items: Vec<ManualItem>,
    buckets: Buckets,
    spices: BTreeSet<String>,
}

impl Session {
    /// Loads the document from `source`, checks the config and validates the recipes.
    pub fn open<S>(source: &S, config: CoreConfig) -> Result<Self, SessionError>
    where
        S: RecipeSource + ?Sized,
    {
        config.check()?;
        info!(source = %source.describe(), "Opening shopping session");
        let document = source.load()?;
        let book = Validator::new(&config.units).validate(&document)?;
        info!(recipes = book.len(), "Recipe list has been loaded");
        Ok(Self::with_book(book, config))
    }

    /// Starts a session on an already validated recipe book.
    pub fn with_book(book: RecipeBook, config: CoreConfig) -> Self {
        Self {
            config,
            book,
            selection: Selection::new(),
            manual_items: Vec::new(),
            buckets: Buckets::new(),
            spices: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.book
    }

    pub fn recipe(&self, name: &str) -> Result<&Recipe, SelectionError> {
        self.book
            .find(name)
            .ok_or_else(|| SelectionError::UnknownRecipe(name.trim().to_string()))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Adds a comma-separated list of recipes to the selection.
    pub fn select(&mut self, names: &str) -> AddOutcome {
        self.selection.add_many(&self.book, names)
    }

    pub fn deselect(&mut self, name: &str) -> Result<(), SelectionError> {
        self.selection.remove(name)
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub fn spices(&self) -> &BTreeSet<String> {
        &self.spices
    }

    pub fn manual_items(&self) -> &[ManualItem] {
        &self.manual_items
    }

    /// Recomputes the totals from the selected recipes (in book order) and
    /// the manual items.
    pub fn prepare(&mut self) -> Result<(), AggregateError> {
        let (buckets, spices) = self.rebuild(None)?;
        info!(
            recipes = self.selection.len(),
            manual_items = self.manual_items.len(),
            ingredients = buckets.len(),
            spices = spices.len(),
            "Prepared shopping list"
        );
        self.buckets = buckets;
        self.spices = spices;
        Ok(())
    }

    /// Parses and adds one ad-hoc item, e.g. `("milk", "1 cup/liquid")`.
    ///
    /// The item is checked against the full rebuild `prepare` would do, so an
    /// accepted item never blocks a later `prepare` of the same selection.
    /// A rejected item leaves the current totals as they were.
    pub fn add_item(&mut self, name: &str, amount_and_unit: &str) -> Result<(), SessionError> {
        let item = ManualItem::parse(name, amount_and_unit, &self.config.units).map_err(|e| {
            warn!(ingredient = name, input = amount_and_unit, error = %e, "Rejected manual item");
            e
        })?;

        let (buckets, spices) = self.rebuild(Some(&item))?;

        info!(ingredient = %item.name, amount = item.amount, unit = %item.unit, "Added manual item");
        self.buckets = buckets;
        self.spices = spices;
        self.manual_items.push(item);
        Ok(())
    }

    /// Forgets every manual item called `name`. Takes effect at the next `prepare`.
    pub fn remove_item(&mut self, name: &str) -> Result<(), InputError> {
        let name = lint_case(name.trim(), CaseStyle::Lower);
        let before = self.manual_items.len();
        self.manual_items.retain(|item| item.name != name);
        if self.manual_items.len() == before {
            return Err(InputError::UnknownItem { ingredient: name });
        }
        info!(ingredient = %name, removed = before - self.manual_items.len(), "Removed manual item");
        Ok(())
    }

    fn rebuild(
        &self,
        extra: Option<&ManualItem>,
    ) -> Result<(Buckets, BTreeSet<String>), AggregateError> {
        let aggregator = Aggregator::new(&self.config.units, &self.config.conversions);
        let mut buckets = Buckets::new();
        let mut spices = BTreeSet::new();

        for recipe in self
            .book
            .iter()
            .filter(|recipe| self.selection.contains(&recipe.name))
        {
            aggregator.aggregate_recipe(&mut buckets, recipe).map_err(|e| {
                error!(recipe = %recipe.name, error = %e, "Failed to gather ingredients");
                e
            })?;
            spices.extend(recipe.spices.iter().cloned());
        }
        for item in self.manual_items.iter().chain(extra) {
            aggregator
                .aggregate(&mut buckets, &item.name, item.amount, &item.unit)
                .map_err(|e| {
                    error!(ingredient = %item.name, error = %e, "Failed to add manual item");
                    e
                })?;
        }
        Ok((buckets, spices))
    }

    pub fn shopping_list(&self) -> ShoppingList {
        assemble(
            &self.buckets,
            &self.spices,
            &self.config.disambiguation_marker,
        )
    }

    /// Empties the selection, manual items, buckets and spices.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.manual_items.clear();
        self.buckets.clear();
        self.spices.clear();
        info!("Cleared shopping list");
    }
}
