//! In-memory recipe store
//!
//! This module provides the InMemoryRecipeStore component that owns the recipe
//! collection for single-threaded use. Recipes are indexed by ID for lookup
//! and kept in a separate order vector so listings follow insertion order.
//!
//! # Duplicate Handling
//!
//! `add` rejects a duplicate ID. While loading a file, `insert_first_wins`
//! keeps only the first occurrence of an ID and ignores later ones.

use crate::core::traits::RecipeStore;
use crate::types::{DietError, Recipe, RecipeId, RecipePatch};
use std::collections::HashMap;

/// Single-threaded recipe store
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    /// Map of recipe ID to recipe
    recipes: HashMap<RecipeId, Recipe>,
    /// IDs in insertion order
    order: Vec<RecipeId>,
}

impl InMemoryRecipeStore {
    /// Create a new empty store
    pub fn new() -> Self {
        InMemoryRecipeStore {
            recipes: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Build a store from a recipe sequence, first occurrence of an ID wins
    pub fn from_recipes<I: IntoIterator<Item = Recipe>>(recipes: I) -> Self {
        let mut store = Self::new();
        for recipe in recipes {
            store.insert_first_wins(recipe);
        }
        store
    }

    /// Insert a recipe unless its ID is already present
    ///
    /// # Returns
    ///
    /// `true` if the recipe was inserted, `false` if it was a duplicate
    pub fn insert_first_wins(&mut self, recipe: Recipe) -> bool {
        if self.recipes.contains_key(&recipe.id) {
            return false;
        }
        self.order.push(recipe.id.clone());
        self.recipes.insert(recipe.id.clone(), recipe);
        true
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn list_recipes(&self) -> Vec<Recipe> {
        self.order
            .iter()
            .filter_map(|id| self.recipes.get(id))
            .cloned()
            .collect()
    }

    fn get(&self, id: &RecipeId) -> Option<Recipe> {
        self.recipes.get(id).cloned()
    }

    fn add(&mut self, recipe: Recipe) -> Result<Recipe, DietError> {
        if self.recipes.contains_key(&recipe.id) {
            return Err(DietError::duplicate_recipe(recipe.id.as_str()));
        }
        self.insert_first_wins(recipe.clone());
        Ok(recipe)
    }

    fn update(&mut self, id: &RecipeId, patch: RecipePatch) -> Result<Recipe, DietError> {
        let recipe = self
            .recipes
            .get_mut(id)
            .ok_or_else(|| DietError::recipe_not_found(id.as_str()))?;
        recipe.apply(patch)?;
        Ok(recipe.clone())
    }

    fn delete(&mut self, id: &RecipeId) -> Result<(), DietError> {
        self.recipes
            .remove(id)
            .ok_or_else(|| DietError::recipe_not_found(id.as_str()))?;
        self.order.retain(|existing| existing != id);
        Ok(())
    }

    fn len(&self) -> usize {
        self.recipes.len()
    }
}
