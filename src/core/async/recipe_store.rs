//! Thread-safe recipe storage for async batch loading
//!
//! This module provides the `AsyncRecipeStore` struct, which stores recipes
//! using concurrent data structures so that batches read from the recipe file
//! can be inserted from several tasks at once.
//!
//! # Design
//!
//! Recipes live in a `DashMap` keyed by ID. Each entry carries the sequence
//! number it was loaded or added with; listings sort by that number, so the
//! snapshot handed to the matcher follows file order no matter which task
//! inserted a recipe first.
//!
//! # Duplicate Handling
//!
//! For loaded recipes the lowest sequence number wins, which is the first
//! occurrence in the file. `insert_recipe` rejects duplicates outright.

use crate::core::traits::RecipeStore;
use crate::types::{DietError, Recipe, RecipeId, RecipePatch};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
struct Sequenced {
    seq: u64,
    recipe: Recipe,
}

/// Thread-safe recipe store
///
/// All methods take `&self` and are safe to call from multiple tasks
/// concurrently.
#[derive(Debug, Default)]
pub struct AsyncRecipeStore {
    recipes: DashMap<RecipeId, Sequenced>,
    next_seq: AtomicU64,
}

impl AsyncRecipeStore {
    /// Create a new empty AsyncRecipeStore
    pub fn new() -> Self {
        Self {
            recipes: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert a recipe read from the file at position `seq`
    ///
    /// If the ID is already present, the entry with the lower sequence number
    /// is kept.
    ///
    /// # Returns
    ///
    /// `true` if this recipe now occupies its ID, `false` if an earlier
    /// occurrence was kept instead
    pub fn insert_loaded(&self, seq: u64, recipe: Recipe) -> bool {
        self.next_seq.fetch_max(seq + 1, Ordering::SeqCst);

        match self.recipes.entry(recipe.id.clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert(Sequenced { seq, recipe });
                true
            }
            Entry::Occupied(mut occupied) => {
                if occupied.get().seq > seq {
                    occupied.insert(Sequenced { seq, recipe });
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Add a new recipe at the end of the collection (thread-safe)
    pub fn insert_recipe(&self, recipe: Recipe) -> Result<Recipe, DietError> {
        match self.recipes.entry(recipe.id.clone()) {
            Entry::Occupied(_) => Err(DietError::duplicate_recipe(recipe.id.as_str())),
            Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                vacant.insert(Sequenced {
                    seq,
                    recipe: recipe.clone(),
                });
                Ok(recipe)
            }
        }
    }

    /// Get a recipe by ID (thread-safe)
    pub fn get_recipe(&self, id: &RecipeId) -> Option<Recipe> {
        self.recipes.get(id).map(|entry| entry.value().recipe.clone())
    }

    /// Apply an edit while holding the entry lock (thread-safe)
    pub fn update_recipe(&self, id: &RecipeId, patch: RecipePatch) -> Result<Recipe, DietError> {
        match self.recipes.get_mut(id) {
            Some(mut entry) => {
                let sequenced = entry.value_mut();
                sequenced.recipe.apply(patch)?;
                Ok(sequenced.recipe.clone())
            }
            None => Err(DietError::recipe_not_found(id.as_str())),
        }
    }

    /// Remove a recipe (thread-safe)
    pub fn remove_recipe(&self, id: &RecipeId) -> Result<(), DietError> {
        self.recipes
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DietError::recipe_not_found(id.as_str()))
    }

    /// Snapshot of all recipes ordered by sequence number
    pub fn snapshot(&self) -> Vec<Recipe> {
        let mut entries: Vec<Sequenced> = self
            .recipes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by_key(|entry| entry.seq);
        entries.into_iter().map(|entry| entry.recipe).collect()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

impl RecipeStore for AsyncRecipeStore {
    fn list_recipes(&self) -> Vec<Recipe> {
        self.snapshot()
    }

    fn get(&self, id: &RecipeId) -> Option<Recipe> {
        self.get_recipe(id)
    }

    fn add(&mut self, recipe: Recipe) -> Result<Recipe, DietError> {
        self.insert_recipe(recipe)
    }

    fn update(&mut self, id: &RecipeId, patch: RecipePatch) -> Result<Recipe, DietError> {
        self.update_recipe(id, patch)
    }

    fn delete(&mut self, id: &RecipeId) -> Result<(), DietError> {
        self.remove_recipe(id)
    }

    fn len(&self) -> usize {
        self.recipe_count()
    }
}
