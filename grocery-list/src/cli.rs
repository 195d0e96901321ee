///
/// This module implements the CLI interface for grocery-list: command parsing,
/// argument validation, the main entrypoint and user-visible output.
///
/// All core logic (validation, unit conversion, aggregation, assembly) lives in
/// the [`grocery-list-core`] crate. This module is strictly glue: it resolves
/// config, opens a session, calls the core in order
/// (validate → select → prepare → add items → assemble) and prints the result.
///
/// [`grocery-list-core`]: ../../grocery-list-core/
use crate::load_config::{load_or_default, resolve_recipes_path, CliConfig};
use crate::render::{
    render_numbered, render_recipe, render_recipes, render_shopping_list, render_units,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use grocery_list_core::contract::RecipeSource;
use grocery_list_core::source::JsonFileSource;
use grocery_list_core::validate::Validator;
use grocery_list_core::{DisplayOptions, Session, UnitKind};
use std::path::PathBuf;

/// CLI for grocery-list: build a shopping list from your recipes.
#[derive(Parser)]
#[clap(
    name = "grocery-list",
    version,
    about = "Build a grocery shopping list from a curated set of recipes"
)]
pub struct Cli {
    /// Path to the YAML config file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the JSON recipe file (overrides the config file and GROCERY_LIST_RECIPES)
    #[clap(long, global = true)]
    pub recipes: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the recipe file and report every problem found
    Validate,
    /// List recipes, optionally filtered by rating or category
    Recipes {
        #[clap(flatten)]
        display: DisplayFlags,
        /// Only recipes rated at least this high
        #[clap(long)]
        min_rating: Option<f64>,
        /// Only recipes in this category
        #[clap(long)]
        in_category: Option<String>,
    },
    /// Print one recipe in full
    Show {
        /// Recipe name (case-insensitive)
        name: String,
    },
    /// List the recognised units
    Units {
        /// all, convertible or non-convertible
        #[clap(long, default_value = "all")]
        kind: UnitKind,
    },
    /// Select recipes, add extra items and print the shopping list
    List {
        /// Recipe names to select; comma-separated lists are accepted
        #[clap(long = "select")]
        select: Vec<String>,
        /// Extra item as `name=amount unit`, e.g. `milk=1 cup/liquid`
        #[clap(long = "add", value_parser = parse_manual_item)]
        add: Vec<(String, String)>,
    },
}

/// Recipe fields to show in a listing. Added on top of the config file's `display`.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct DisplayFlags {
    /// Show each recipe's ingredients
    #[clap(long)]
    pub ingredients: bool,
    /// Show amounts and units next to ingredients
    #[clap(long)]
    pub verbose: bool,
    #[clap(long)]
    pub rating: bool,
    #[clap(long)]
    pub spices: bool,
    #[clap(long)]
    pub category: bool,
    #[clap(long)]
    pub url: bool,
    #[clap(long)]
    pub servings: bool,
}

impl From<DisplayFlags> for DisplayOptions {
    fn from(flags: DisplayFlags) -> Self {
        DisplayOptions {
            ingredients: flags.ingredients,
            verbose: flags.verbose,
            rating: flags.rating,
            spices: flags.spices,
            category: flags.category,
            url: flags.url,
            servings: flags.servings,
        }
    }
}

/// Splits `name=amount unit` at the first `=`.
pub fn parse_manual_item(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, rest)) if !name.trim().is_empty() && !rest.trim().is_empty() => {
            Ok((name.trim().to_string(), rest.trim().to_string()))
        }
        _ => Err(format!("expected `name=amount unit`, got `{s}`")),
    }
}

fn open_session(flag: Option<PathBuf>, config: &CliConfig) -> Result<Session> {
    let path = resolve_recipes_path(flag, config)?;
    let source = JsonFileSource::new(&path);
    Session::open(&source, config.core.clone())
        .with_context(|| format!("Could not use recipe file {}", path.display()))
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");
    let config = load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Units { kind } => {
            print!("{}", render_units(&config.core.units.units(kind)));
            Ok(())
        }
        Commands::Validate => {
            let path = resolve_recipes_path(cli.recipes, &config)?;
            let document = JsonFileSource::new(&path).load()?;
            let checked = Validator::new(&config.core.units).check(&document);
            if checked.report.is_clean() {
                println!(
                    "Recipe list passed validation: {} recipe(s)",
                    checked.recipes.len()
                );
                Ok(())
            } else {
                print!("{}", checked.report);
                tracing::error!(
                    command = "validate",
                    problems = checked.report.problem_count(),
                    "Validation failed"
                );
                anyhow::bail!("Fix recipe list before proceeding")
            }
        }
        Commands::Recipes {
            display,
            min_rating,
            in_category,
        } => {
            let session = open_session(cli.recipes, &config)?;
            let options = config.display.merge(display.into());
            let recipes = session
                .recipes()
                .matching(min_rating, in_category.as_deref());

            let plain = options == DisplayOptions::default();
            if plain && min_rating.is_some() {
                print!("{}", render_numbered(recipes, true));
            } else if plain {
                print!("{}", render_numbered(recipes, false));
            } else {
                print!("{}", render_recipes(recipes, &options));
            }
            Ok(())
        }
        Commands::Show { name } => {
            let session = open_session(cli.recipes, &config)?;
            let recipe = session.recipe(&name)?;
            println!("{}", render_recipe(recipe)?);
            Ok(())
        }
        Commands::List { select, add } => {
            let mut session = open_session(cli.recipes, &config)?;
            for names in &select {
                let outcome = session.select(names);
                if !outcome.unknown.is_empty() {
                    anyhow::bail!(
                        "Recipe(s) not in the recipe list: {}",
                        outcome.unknown.join(", ")
                    );
                }
            }
            session.prepare()?;
            for (name, amount_and_unit) in &add {
                session.add_item(name, amount_and_unit)?;
            }
            tracing::info!(
                command = "list",
                selected = session.selection().len(),
                manual_items = session.manual_items().len(),
                "Shopping list ready"
            );
            print!("{}", render_shopping_list(&session.shopping_list()));
            Ok(())
        }
    }
}
