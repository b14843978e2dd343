//! Recipe types
//!
//! This module defines the [`Recipe`] value type, its identifier, and the
//! [`RecipePatch`] used by edits.

use super::error::DietError;
use super::nutrients::{Macros, Nutrient};
use rust_decimal::Decimal;
use std::fmt;

/// Image shown when a recipe has no image reference
pub const DEFAULT_IMAGE: &str = "/images/default-recipe.jpg";

/// Unique, stable recipe identifier
///
/// Always non-empty and free of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(String);

impl RecipeId {
    /// Create an identifier from user or file input
    ///
    /// # Errors
    ///
    /// Returns `DietError::MissingField` if the input is blank.
    pub fn new(raw: &str) -> Result<Self, DietError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DietError::missing_field("id"));
        }
        Ok(RecipeId(trimmed.to_string()))
    }

    /// Generate a fresh identifier for a recipe created without one
    pub fn generate() -> Self {
        RecipeId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split free-text steps into a clean step list
///
/// Lines are trimmed and blank lines dropped.
pub fn split_steps(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a step list back into its stored form
pub fn join_steps(steps: &[String]) -> String {
    steps.join("\n")
}

/// A stored recipe
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    /// Unique identifier
    pub id: RecipeId,

    /// Display name, never blank
    pub name: String,

    /// Cuisine tag (may be empty)
    pub tag: String,

    /// Per-serving carbohydrate, protein and fat grams
    pub macros: Macros,

    /// Ordered preparation steps
    pub steps: Vec<String>,

    /// Optional image reference (object-storage key or URL)
    pub image: Option<String>,
}

impl Recipe {
    /// Create a recipe with no steps and no image
    ///
    /// # Errors
    ///
    /// Returns `DietError::MissingField` if the name is blank.
    pub fn new(id: RecipeId, name: &str, tag: &str, macros: Macros) -> Result<Self, DietError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DietError::missing_field("name"));
        }

        Ok(Recipe {
            id,
            name: name.to_string(),
            tag: tag.trim().to_string(),
            macros,
            steps: Vec::new(),
            image: None,
        })
    }

    /// Replace the step list
    ///
    /// Each entry may itself hold several lines; the result is normalised
    /// with [`split_steps`].
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.steps = steps
            .into_iter()
            .flat_map(|step| split_steps(step.as_ref()))
            .collect();
        self
    }

    /// Replace the image reference; blank references are treated as absent
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = clean_image(image);
        self
    }

    /// Image reference to display, falling back to [`DEFAULT_IMAGE`]
    pub fn image_or_default(&self) -> &str {
        self.image.as_deref().unwrap_or(DEFAULT_IMAGE)
    }

    /// Case-insensitive substring match against name or tag
    ///
    /// A blank term matches every recipe.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term) || self.tag.to_lowercase().contains(&term)
    }

    /// Apply an edit
    ///
    /// The patch is validated in full before any field changes, so a rejected
    /// patch leaves the recipe untouched. The identifier is never changed.
    pub fn apply(&mut self, patch: RecipePatch) -> Result<(), DietError> {
        let name = match patch.name {
            Some(name) if name.trim().is_empty() => return Err(DietError::missing_field("name")),
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let mut macros = self.macros;
        for (nutrient, value) in Nutrient::ALL
            .into_iter()
            .zip([patch.carbs, patch.protein, patch.fat])
        {
            if let Some(value) = value {
                macros = macros.with(nutrient, value)?;
            }
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(tag) = patch.tag {
            self.tag = tag.trim().to_string();
        }
        self.macros = macros;
        if let Some(steps) = patch.steps {
            self.steps = steps.iter().flat_map(|step| split_steps(step)).collect();
        }
        if let Some(image) = patch.image {
            self.image = clean_image(image);
        }

        Ok(())
    }
}

fn clean_image(image: Option<String>) -> Option<String> {
    image
        .map(|image| image.trim().to_string())
        .filter(|image| !image.is_empty())
}

/// A partial recipe edit
///
/// `None` leaves a field unchanged. For `image`, `Some(None)` clears the
/// reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub carbs: Option<Decimal>,
    pub protein: Option<Decimal>,
    pub fat: Option<Decimal>,
    pub steps: Option<Vec<String>>,
    pub image: Option<Option<String>>,
}

impl RecipePatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == RecipePatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Recipe {
        Recipe::new(
            RecipeId::new("r1").unwrap(),
            "Kung Pao Chicken",
            "Sichuan",
            Macros::parse("20", "30", "12").unwrap(),
        )
        .unwrap()
    }

    #[rstest]
    #[case::plain("abc", Ok("abc"))]
    #[case::trimmed("  abc ", Ok("abc"))]
    #[case::blank("   ", Err(DietError::missing_field("id")))]
    fn test_recipe_id_new(#[case] raw: &str, #[case] expected: Result<&str, DietError>) {
        let result = RecipeId::new(raw);
        assert_eq!(result.as_ref().map(RecipeId::as_str), expected.as_ref().map(|s| *s));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(RecipeId::generate(), RecipeId::generate());
    }

    #[test]
    fn test_recipe_new_requires_name() {
        let result = Recipe::new(
            RecipeId::new("r1").unwrap(),
            "  ",
            "",
            Macros::default(),
        );
        assert_eq!(result, Err(DietError::missing_field("name")));
    }

    #[test]
    fn test_with_steps_normalises_lines() {
        let recipe = sample().with_steps(["Dice chicken\n\n  Fry peanuts ", "", "Serve"]);
        assert_eq!(recipe.steps, vec!["Dice chicken", "Fry peanuts", "Serve"]);
        assert_eq!(join_steps(&recipe.steps), "Dice chicken\nFry peanuts\nServe");
    }

    #[test]
    fn test_image_defaults_when_absent_or_blank() {
        assert_eq!(sample().image_or_default(), DEFAULT_IMAGE);
        assert_eq!(sample().with_image(Some("  ".into())).image_or_default(), DEFAULT_IMAGE);
        assert_eq!(
            sample().with_image(Some("recipe-images/r1.jpg".into())).image_or_default(),
            "recipe-images/r1.jpg"
        );
    }

    #[rstest]
    #[case::name_match("kung", true)]
    #[case::tag_match("SICH", true)]
    #[case::blank("  ", true)]
    #[case::no_match("pasta", false)]
    fn test_matches_search(#[case] term: &str, #[case] expected: bool) {
        assert_eq!(sample().matches_search(term), expected);
    }

    #[test]
    fn test_apply_updates_selected_fields() {
        let mut recipe = sample().with_image(Some("a.jpg".into()));
        recipe
            .apply(RecipePatch {
                tag: Some("Chinese".into()),
                fat: Some(Decimal::new(8, 0)),
                steps: Some(vec!["Cook".into()]),
                image: Some(None),
                ..RecipePatch::default()
            })
            .unwrap();

        assert_eq!(recipe.name, "Kung Pao Chicken");
        assert_eq!(recipe.tag, "Chinese");
        assert_eq!(recipe.macros.fat(), Decimal::new(8, 0));
        assert_eq!(recipe.macros.carbs(), Decimal::new(20, 0));
        assert_eq!(recipe.steps, vec!["Cook"]);
        assert_eq!(recipe.image, None);
    }

    #[test]
    fn test_rejected_patch_leaves_recipe_unchanged() {
        let mut recipe = sample();
        let result = recipe.apply(RecipePatch {
            name: Some("Renamed".into()),
            protein: Some(Decimal::new(-1, 0)),
            ..RecipePatch::default()
        });

        assert!(matches!(result, Err(DietError::InvalidMacro { .. })));
        assert_eq!(recipe, sample());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(RecipePatch::default().is_empty());
        assert!(!RecipePatch {
            tag: Some(String::new()),
            ..RecipePatch::default()
        }
        .is_empty());
    }
}
