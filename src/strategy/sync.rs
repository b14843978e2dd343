//! Synchronous loading strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! LoadStrategy trait. It streams rows through the `SyncReader` and collects
//! them into an `InMemoryRecipeStore`, which drops later duplicates.
//!
//! # Memory Efficiency
//!
//! Rows are converted one at a time; only the accepted recipes are kept.

use crate::core::{InMemoryRecipeStore, RecipeStore};
use crate::io::sync_reader::SyncReader;
use crate::strategy::LoadStrategy;
use crate::types::{DietError, Recipe};
use std::path::Path;
use tracing::{debug, warn};

/// Synchronous loading strategy
///
/// # Examples
///
/// ```no_run
/// use dietdice::strategy::{LoadStrategy, SyncLoadStrategy};
/// use std::path::Path;
///
/// let recipes = SyncLoadStrategy
///     .load(Path::new("recipes.csv"))
///     .expect("Loading failed");
/// println!("{} recipes", recipes.len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncLoadStrategy;

impl LoadStrategy for SyncLoadStrategy {
    fn load(&self, path: &Path) -> Result<Vec<Recipe>, DietError> {
        let reader = SyncReader::new(path)?;
        let mut store = InMemoryRecipeStore::new();
        let mut skipped = 0usize;

        for result in reader {
            match result {
                Ok(recipe) => {
                    let id = recipe.id.clone();
                    if !store.insert_first_wins(recipe) {
                        warn!(id = %id, "duplicate recipe id ignored");
                    }
                }
                Err(e) => {
                    skipped += 1;
                    warn!(error = %e, "skipping invalid recipe row");
                }
            }
        }

        debug!(loaded = store.len(), skipped, "sync load finished");
        Ok(store.list_recipes())
    }
}
