use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{error, info};

use crate::contract::RecipeSource;
use crate::error::LoadError;

/// Reads the recipe document from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecipeSource for JsonFileSource {
    fn load(&self) -> Result<Value, LoadError> {
        info!(path = %self.path.display(), "Loading recipe file");
        let content = fs::read_to_string(&self.path).map_err(|e| {
            error!(error = ?e, path = %self.path.display(), "Failed to read recipe file");
            LoadError::Io {
                path: self.path.clone(),
                source: e,
            }
        })?;
        serde_json::from_str(&content).map_err(|e| {
            error!(error = %e, path = %self.path.display(), "Failed to parse recipe file");
            LoadError::Json(e)
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A document already held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    document: Value,
}

impl InMemorySource {
    pub fn new(document: Value) -> Self {
        Self { document }
    }
}

impl RecipeSource for InMemorySource {
    fn load(&self) -> Result<Value, LoadError> {
        Ok(self.document.clone())
    }

    fn describe(&self) -> String {
        "in-memory document".to_string()
    }
}
