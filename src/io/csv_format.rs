//! CSV format handling for the recipe file
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecipeRecord structure for deserialization
//! - Conversion from CSV records to validated recipes
//! - Recipe file serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Format
//!
//! ```text
//! id,name,tag,carbs,protein,fat,steps,image
//! r1,Kung Pao Chicken,Sichuan,20,30,12,"Dice chicken
//! Fry peanuts",recipe-images/r1.jpg
//! ```
//!
//! Steps are one quoted field with one step per line. `steps` and `image`
//! may be empty.

use crate::types::nutrients::format_grams;
use crate::types::recipe::join_steps;
use crate::types::{DietError, Macros, Recipe, RecipeId};
use serde::Deserialize;
use std::io::Write;

/// Column order of the recipe file
pub const RECIPE_HEADER: [&str; 8] = ["id", "name", "tag", "carbs", "protein", "fat", "steps", "image"];

/// CSV record structure for deserialization
///
/// Macro columns are kept as strings so that validation can report the raw
/// value that was rejected.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecipeRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub carbs: Option<String>,
    #[serde(default)]
    pub protein: Option<String>,
    #[serde(default)]
    pub fat: Option<String>,
    #[serde(default)]
    pub steps: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Convert a CsvRecipeRecord to a Recipe
///
/// This function:
/// - Requires a non-blank id and name
/// - Parses the three macro columns as non-negative gram amounts
/// - Splits the steps column into a step list
///
/// # Errors
///
/// * `DietError::MissingField` for a blank id, name or macro column
/// * `DietError::InvalidMacro` for a macro that is not a valid gram amount
pub fn convert_csv_record(csv_record: CsvRecipeRecord) -> Result<Recipe, DietError> {
    let id = RecipeId::new(csv_record.id.as_deref().unwrap_or_default())?;

    let required = |value: &Option<String>, field: &str| -> Result<String, DietError> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_else(|| DietError::missing_field(field))
    };

    let name = required(&csv_record.name, "name")?;
    let macros = Macros::parse(
        &required(&csv_record.carbs, "carbs")?,
        &required(&csv_record.protein, "protein")?,
        &required(&csv_record.fat, "fat")?,
    )?;

    let recipe = Recipe::new(id, &name, csv_record.tag.as_deref().unwrap_or_default(), macros)?
        .with_steps(csv_record.steps.as_deref())
        .with_image(csv_record.image);

    Ok(recipe)
}

/// Write recipes in file format
///
/// Recipes are written in the order given.
pub fn write_recipes_csv(recipes: &[Recipe], output: &mut dyn Write) -> Result<(), DietError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(RECIPE_HEADER)?;

    for recipe in recipes {
        let carbs = format_grams(recipe.macros.carbs());
        let protein = format_grams(recipe.macros.protein());
        let fat = format_grams(recipe.macros.fat());
        let steps = join_steps(&recipe.steps);

        writer.write_record([
            recipe.id.as_str(),
            recipe.name.as_str(),
            recipe.tag.as_str(),
            carbs.as_str(),
            protein.as_str(),
            fat.as_str(),
            steps.as_str(),
            recipe.image.as_deref().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
