//! Output formatting for rolls and recipe details

use crate::types::nutrients::{format_grams, format_signed_grams};
use crate::types::{DietError, Nutrient, NutrientTarget, Recipe, RecipePair};
use std::io::Write;

/// Shown when a roll finds no pair within tolerance
pub const NO_MATCH_MESSAGE: &str =
    "No recipe combination found; try adjusting your nutrient targets.";

/// Write a rolled pair with totals and deltas as CSV
///
/// ```text
/// row,id,name,tag,carbs,protein,fat
/// recipe,A,Egg Salad,Salad,5,22,3
/// recipe,B,Stir Fry,Chinese,12,18,8
/// total,,,,17,40,11
/// target,,,,20,40,10
/// delta,,,,-3,0,+1
/// close,,,,yes,yes,yes
/// ```
///
/// The `close` row flags deltas within 10 g of the target.
pub fn write_pair_report(
    pair: &RecipePair,
    target: &NutrientTarget,
    output: &mut dyn Write,
) -> Result<(), DietError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["row", "id", "name", "tag", "carbs", "protein", "fat"])?;

    for recipe in pair.recipes() {
        let mut row = vec![
            "recipe".to_string(),
            recipe.id.to_string(),
            recipe.name.clone(),
            recipe.tag.clone(),
        ];
        row.extend(Nutrient::ALL.map(|n| format_grams(recipe.macros.get(n))));
        writer.write_record(&row)?;
    }

    let aggregate = pair.aggregate();
    let deltas = pair.deltas(target);
    let summaries = [
        ("total", Nutrient::ALL.map(|n| format_grams(aggregate.get(n)))),
        ("target", Nutrient::ALL.map(|n| format_grams(target.get(n)))),
        ("delta", Nutrient::ALL.map(|n| format_signed_grams(deltas.get(n)))),
    ];
    for (label, values) in summaries {
        let mut row = vec![label.to_string(), String::new(), String::new(), String::new()];
        row.extend(values);
        writer.write_record(&row)?;
    }

    let mut close = vec!["close".to_string(), String::new(), String::new(), String::new()];
    close.extend(Nutrient::ALL.map(|n| (if deltas.is_close(n) { "yes" } else { "no" }).to_string()));
    writer.write_record(&close)?;

    writer.flush()?;
    Ok(())
}

/// Write a human-readable recipe detail block
pub fn write_recipe_detail(recipe: &Recipe, output: &mut dyn Write) -> Result<(), DietError> {
    if recipe.tag.is_empty() {
        writeln!(output, "{}", recipe.name)?;
    } else {
        writeln!(output, "{} [{}]", recipe.name, recipe.tag)?;
    }
    writeln!(output, "id: {}", recipe.id)?;
    writeln!(
        output,
        "carbs: {} g  protein: {} g  fat: {} g",
        format_grams(recipe.macros.carbs()),
        format_grams(recipe.macros.protein()),
        format_grams(recipe.macros.fat())
    )?;
    writeln!(output, "image: {}", recipe.image_or_default())?;

    if recipe.steps.is_empty() {
        writeln!(output, "steps: none yet")?;
    } else {
        writeln!(output, "steps:")?;
        for (index, step) in recipe.steps.iter().enumerate() {
            writeln!(output, "  {}. {}", index + 1, step)?;
        }
    }

    Ok(())
}
