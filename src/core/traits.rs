//! Core traits for recipe storage
//!
//! This module defines the trait abstraction that allows both the synchronous
//! and the concurrent recipe store to be used interchangeably.

use crate::types::{DietError, Recipe, RecipeId, RecipePatch};

/// Trait for managing the recipe collection
///
/// Implementations can be synchronous (using HashMap) or concurrent (using DashMap).
/// Listing always returns recipes in insertion order so that pair enumeration
/// over the snapshot is deterministic.
pub trait RecipeStore {
    /// Snapshot of every recipe in insertion order
    fn list_recipes(&self) -> Vec<Recipe>;

    /// Get a recipe by ID
    fn get(&self, id: &RecipeId) -> Option<Recipe>;

    /// Add a new recipe, rejecting duplicate IDs
    fn add(&mut self, recipe: Recipe) -> Result<Recipe, DietError>;

    /// Apply an edit to an existing recipe and return the updated value
    fn update(&mut self, id: &RecipeId, patch: RecipePatch) -> Result<Recipe, DietError>;

    /// Remove a recipe
    fn delete(&mut self, id: &RecipeId) -> Result<(), DietError>;

    /// Number of stored recipes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recipes whose name or tag contains `term`, case-insensitively
    ///
    /// A blank term returns every recipe.
    fn search(&self, term: &str) -> Vec<Recipe> {
        self.list_recipes()
            .into_iter()
            .filter(|recipe| recipe.matches_search(term))
            .collect()
    }
}
