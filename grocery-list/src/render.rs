//! Plain-text rendering of recipes, selections and the shopping list.
//!
//! Each listing is a small [`Display`] view; the `render_*` functions turn
//! one into a `String` so the CLI decides where it goes.

use std::fmt::{self, Display, Formatter};

use grocery_list_core::case::name_case;
use grocery_list_core::{DisplayOptions, Recipe, ShoppingList};

/// Rounds to two decimals and drops a trailing `.0`, so 3.9998 prints as `4`.
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    format!("{rounded}")
}

fn spice_line(recipe: &Recipe) -> String {
    let spices: Vec<String> = recipe.spices.iter().map(|s| name_case(s)).collect();
    spices.join(", ")
}

struct RecipeListing<'a> {
    recipes: Vec<&'a Recipe>,
    options: &'a DisplayOptions,
}

impl Display for RecipeListing<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let options = self.options;
        for recipe in &self.recipes {
            writeln!(f, "Recipe: {}", recipe.name)?;
            // The spice list always follows the ingredients.
            if options.ingredients {
                writeln!(f, "Ingredients:")?;
                for line in &recipe.ingredients {
                    writeln!(f, "    {}", line.name)?;
                    if options.verbose {
                        writeln!(f, "        amount: {}", line.quantity.amount)?;
                        writeln!(f, "        unit: {}", line.quantity.unit)?;
                    }
                }
                writeln!(f, "Spices: {}", spice_line(recipe))?;
            } else if options.spices {
                writeln!(f, "    Spices: {}", spice_line(recipe))?;
            }
            if options.rating {
                writeln!(f, "    Rating: {}", recipe.rating)?;
            }
            if options.category {
                writeln!(f, "    Category: {}", name_case(&recipe.category))?;
            }
            if options.url {
                writeln!(f, "    Url: {}", recipe.url)?;
            }
            if options.servings {
                writeln!(f, "    Servings: {}", recipe.servings)?;
            }
        }
        Ok(())
    }
}

struct NumberedListing<'a> {
    recipes: Vec<&'a Recipe>,
    with_rating: bool,
}

impl Display for NumberedListing<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, recipe) in self.recipes.iter().enumerate() {
            write!(f, "{}. {}", i + 1, recipe.name)?;
            if self.with_rating {
                write!(f, " -- {}/10", recipe.rating)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct ShoppingListView<'a>(&'a ShoppingList);

impl Display for ShoppingListView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let list = self.0;
        if list.items().is_empty() && list.spices().is_empty() {
            return writeln!(f, "Shopping list is empty.");
        }
        if !list.items().is_empty() {
            writeln!(f, "MAIN INGREDIENTS / ITEMS\n")?;
            for item in list.items() {
                writeln!(
                    f,
                    "{} - {} {}",
                    name_case(&item.key),
                    format_amount(item.ingredient.amount),
                    item.ingredient.unit
                )?;
            }
        }
        if !list.spices().is_empty() {
            if !list.items().is_empty() {
                writeln!(f)?;
            }
            writeln!(f, "SPICE LIST\n")?;
            for spice in list.spices() {
                writeln!(f, "{}", name_case(spice))?;
            }
        }
        Ok(())
    }
}

pub fn render_recipes<'a, I>(recipes: I, options: &DisplayOptions) -> String
where
    I: IntoIterator<Item = &'a Recipe>,
{
    RecipeListing {
        recipes: recipes.into_iter().collect(),
        options,
    }
    .to_string()
}

/// Numbered list of recipes, with the rating when asked for.
pub fn render_numbered<'a, I>(recipes: I, with_rating: bool) -> String
where
    I: IntoIterator<Item = &'a Recipe>,
{
    NumberedListing {
        recipes: recipes.into_iter().collect(),
        with_rating,
    }
    .to_string()
}

/// The full recipe as pretty JSON.
pub fn render_recipe(recipe: &Recipe) -> serde_json::Result<String> {
    serde_json::to_string_pretty(recipe)
}

pub fn render_shopping_list(list: &ShoppingList) -> String {
    ShoppingListView(list).to_string()
}

pub fn render_units(units: &[&str]) -> String {
    units.iter().map(|unit| format!("{unit}\n")).collect()
}
