#![doc = "grocery-list-core: core logic library for grocery-list."]

//! This crate holds the data model and the pipeline that turns a recipe
//! collection into a shopping list:
//! validation → selection → aggregation → assembly.
//! It performs no terminal I/O; rendering belongs to the CLI crate.
//!
//! # Usage
//! Open a [`session::Session`] from a [`contract::RecipeSource`], select
//! recipes, call `prepare`, then read `shopping_list`.

pub mod aggregate;
pub mod assemble;
pub mod case;
pub mod config;
pub mod contract;
pub mod error;
pub mod manual;
pub mod recipe;
pub mod selection;
pub mod session;
pub mod source;
pub mod units;
pub mod validate;

pub use aggregate::{AggregatedIngredient, Aggregator, BucketKind, Buckets};
pub use assemble::{assemble, ShoppingItem, ShoppingList};
pub use config::{CoreConfig, DisplayOptions};
pub use error::{
    AggregateError, ConfigError, ConversionError, InputError, LoadError, SelectionError,
    SessionError, ValidationError,
};
pub use recipe::{Recipe, RecipeBook};
pub use session::Session;
pub use units::{ConversionTable, UnitCatalog, UnitKind};
