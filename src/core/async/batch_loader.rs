//! Concurrent batch loading into the async recipe store
//!
//! This module provides the `BatchLoader` struct, which takes batches of
//! recipes read from the recipe file and inserts them into an
//! [`AsyncRecipeStore`] from several tokio tasks at once.
//!
//! # Architecture
//!
//! ```text
//! BatchLoader
//!     ├── Arc<AsyncRecipeStore>  (shared, DashMap-backed)
//!     └── partitions             (number of tasks per batch)
//! ```
//!
//! Every recipe carries its file sequence number, so the final snapshot is
//! ordered the same way regardless of task scheduling.

use std::sync::Arc;

use super::AsyncRecipeStore;
use crate::types::{DietError, Recipe, RecipeId};
use futures::future::join_all;
use tokio::task::JoinError;
use tracing::{error, warn};

/// Outcome of inserting a single loaded recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    /// Position of the recipe in the file
    pub seq: u64,
    /// The recipe's ID
    pub id: RecipeId,
    /// Whether the recipe was kept (false for a later duplicate)
    pub inserted: bool,
}

/// Batch loader with round-robin partitioning
#[derive(Debug, Clone)]
pub struct BatchLoader {
    store: Arc<AsyncRecipeStore>,
    partitions: usize,
}

impl BatchLoader {
    /// Create a new BatchLoader
    ///
    /// `partitions` is clamped to at least one.
    pub fn new(store: Arc<AsyncRecipeStore>, partitions: usize) -> Self {
        Self {
            store,
            partitions: partitions.max(1),
        }
    }

    /// Split a batch into at most `partitions` sub-batches
    ///
    /// Each recipe appears in exactly one sub-batch and keeps its sequence
    /// number.
    pub fn partition(&self, batch: Vec<(u64, Recipe)>) -> Vec<Vec<(u64, Recipe)>> {
        let mut parts: Vec<Vec<(u64, Recipe)>> = (0..self.partitions).map(|_| Vec::new()).collect();
        for (index, item) in batch.into_iter().enumerate() {
            parts[index % self.partitions].push(item);
        }
        parts.retain(|part| !part.is_empty());
        parts
    }

    fn load_partition(&self, part: Vec<(u64, Recipe)>) -> Vec<LoadResult> {
        part.into_iter()
            .map(|(seq, recipe)| {
                let id = recipe.id.clone();
                let inserted = self.store.insert_loaded(seq, recipe);
                LoadResult { seq, id, inserted }
            })
            .collect()
    }

    /// Insert a batch using one spawned task per partition
    ///
    /// Returns one result per recipe. Results are not in sequence order.
    ///
    /// # Errors
    ///
    /// Returns `DietError::RuntimeError` if any partition task fails; the
    /// store then holds an incomplete collection and must not be used.
    pub async fn load_batch(&self, batch: Vec<(u64, Recipe)>) -> Result<Vec<LoadResult>, DietError> {
        let tasks = self.partition(batch).into_iter().map(|part| {
            let loader = self.clone();
            tokio::spawn(async move { loader.load_partition(part) })
        });

        let results = collect_results(join_all(tasks).await)?;

        for result in results.iter().filter(|result| !result.inserted) {
            warn!(id = %result.id, seq = result.seq, "duplicate recipe id ignored");
        }

        Ok(results)
    }
}

fn collect_results(
    joined: Vec<Result<Vec<LoadResult>, JoinError>>,
) -> Result<Vec<LoadResult>, DietError> {
    let mut results = Vec::new();
    for part in joined {
        match part {
            Ok(part_results) => results.extend(part_results),
            Err(e) => {
                error!(error = ?e, "recipe load task failed");
                return Err(DietError::runtime(format!("Recipe load task failed: {}", e)));
            }
        }
    }
    Ok(results)
}
