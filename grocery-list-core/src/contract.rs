//! # contract: where the raw recipe document comes from
//!
//! The core never opens files on its own behalf. A [`RecipeSource`] hands it
//! the raw, unvalidated document, and the validator decides whether it can be
//! used. Concrete sources live in [`crate::source`]; tests can use the
//! `mockall`-generated `MockRecipeSource` (enabled by the `test-export-mocks`
//! feature).

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde_json::Value;

use crate::error::LoadError;

/// Supplies the raw recipe document, a JSON value with a top-level `recipes` list.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait RecipeSource {
    fn load(&self) -> Result<Value, LoadError>;

    /// Short description for logs, e.g. a file path.
    fn describe(&self) -> String;
}
