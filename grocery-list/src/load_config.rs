/// `load_config` module: loads a YAML config file and adapts it into the
/// core reference tables plus the CLI's own settings.
///
/// # Responsibilities
/// - Parse the user-supplied YAML into type-safe structs
/// - Fall back to the built-in unit vocabulary and conversion table for every
///   section the file leaves out
/// - Resolve the recipe file location from flag, environment and file
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::{Context, Result};
use grocery_list_core::{ConversionTable, CoreConfig, DisplayOptions, UnitCatalog};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Environment variable naming the recipe file.
pub const RECIPES_ENV: &str = "GROCERY_LIST_RECIPES";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliConfig {
    pub recipes: Option<PathBuf>,
    pub core: CoreConfig,
    pub display: DisplayOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    recipes: Option<PathBuf>,
    disambiguation_marker: Option<String>,
    units: Option<UnitCatalog>,
    conversions: Option<ConversionTable>,
    #[serde(default)]
    display: DisplayOptions,
}

/// Loads a YAML config file. Missing sections keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref).map_err(|e| {
        error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
        anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e)
    })?;

    // An empty file is a valid "all defaults" config.
    let raw: RawConfig = if config_content.trim().is_empty() {
        RawConfig::default()
    } else {
        serde_yaml::from_str(&config_content).map_err(|e| {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            anyhow::anyhow!("Failed to parse config YAML: {e}")
        })?
    };

    let defaults = CoreConfig::default();
    let core = CoreConfig {
        units: raw.units.unwrap_or(defaults.units),
        conversions: raw.conversions.unwrap_or(defaults.conversions),
        disambiguation_marker: raw
            .disambiguation_marker
            .unwrap_or(defaults.disambiguation_marker),
    };
    core.check()
        .with_context(|| format!("Invalid config in {:?}", path_ref))?;
    core.trace_loaded();

    Ok(CliConfig {
        recipes: raw.recipes,
        core,
        display: raw.display,
    })
}

/// Loads `path` when given, otherwise the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<CliConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            info!("No config file given, using built-in tables");
            Ok(CliConfig::default())
        }
    }
}

/// Picks the recipe file: explicit flag, then `GROCERY_LIST_RECIPES`, then the config file.
pub fn resolve_recipes_path(flag: Option<PathBuf>, config: &CliConfig) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Ok(path) = std::env::var(RECIPES_ENV) {
        if !path.trim().is_empty() {
            info!(recipes = %path, "Recipe file taken from {}", RECIPES_ENV);
            return Ok(PathBuf::from(path));
        }
    }
    config.recipes.clone().ok_or_else(|| {
        error!("No recipe file configured");
        anyhow::anyhow!(
            "No recipe file given: pass --recipes, set {RECIPES_ENV}, or add `recipes:` to the config file"
        )
    })
}
