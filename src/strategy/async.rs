//! Asynchronous batch loading strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! LoadStrategy trait. Rows are read in batches and each batch is inserted
//! into a shared store from several tokio tasks.
//!
//! # Architecture
//!
//! ```text
//! AsyncLoadStrategy
//!     ├── LoadConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchLoader (round-robin partitioning + tasks)
//!     └── AsyncRecipeStore (DashMap, sequence-ordered snapshot)
//! ```
//!
//! # Ordering
//!
//! - Every row is numbered by its position in the file before insertion
//! - Partitions within a batch run concurrently
//! - The final snapshot is sorted by position, and on duplicate ids the
//!   earliest row wins, so the result matches the sync strategy

use crate::core::r#async::{AsyncRecipeStore, BatchLoader};
use crate::io::async_reader::AsyncReader;
use crate::strategy::LoadStrategy;
use crate::types::{DietError, Recipe};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for batch loading
///
/// Controls how rows are batched and the number of worker threads used to
/// insert each batch.
#[derive(Clone, Debug)]
pub struct LoadConfig {
    /// Number of recipes per batch
    pub batch_size: usize,
    /// Maximum number of concurrent insert tasks (and runtime worker threads)
    pub max_concurrent_batches: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl LoadConfig {
    /// Create a new LoadConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch loading strategy
///
/// AsyncLoadStrategy is Send + Sync; it creates its own tokio runtime per
/// load, so it may be called from synchronous code.
#[derive(Debug, Clone)]
pub struct AsyncLoadStrategy {
    config: LoadConfig,
}

impl AsyncLoadStrategy {
    /// Create a new AsyncLoadStrategy with the specified configuration
    pub fn new(config: LoadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    async fn load_async(&self, path: &Path) -> Result<Vec<Recipe>, DietError> {
        let store = Arc::new(AsyncRecipeStore::new());
        let loader = BatchLoader::new(Arc::clone(&store), self.config.max_concurrent_batches);

        let file = tokio::fs::File::open(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DietError::file_not_found(path),
            _ => DietError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        // Wrap tokio file in a compatibility layer for csv-async
        let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
        let mut reader = AsyncReader::new(compat_file);
        reader.read_headers().await?;

        let mut next_seq = 0u64;
        loop {
            let batch = reader.read_batch(self.config.batch_size).await;
            if batch.is_empty() {
                break;
            }

            let numbered: Vec<(u64, Recipe)> = batch
                .into_iter()
                .map(|recipe| {
                    let seq = next_seq;
                    next_seq += 1;
                    (seq, recipe)
                })
                .collect();

            // Wait for the batch before reading the next one
            loader.load_batch(numbered).await?;
        }

        debug!(
            loaded = store.recipe_count(),
            skipped = reader.skipped(),
            "async load finished"
        );
        Ok(store.snapshot())
    }
}

impl LoadStrategy for AsyncLoadStrategy {
    fn load(&self, path: &Path) -> Result<Vec<Recipe>, DietError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| DietError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        runtime.block_on(self.load_async(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_load_config_defaults() {
        let config = LoadConfig::default();
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.max_concurrent_batches, num_cpus::get());
    }

    #[rstest]
    #[case::zero_batch_size(0, 4, 1000, 4)]
    #[case::zero_max_concurrent(50, 0, 50, num_cpus::get())]
    #[case::custom(50, 4, 50, 4)]
    fn test_load_config_new(
        #[case] batch_size: usize,
        #[case] max_concurrent: usize,
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let config = LoadConfig::new(batch_size, max_concurrent);
        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncLoadStrategy::new(LoadConfig::default());
        let result = strategy.load(Path::new("nonexistent-recipes.csv"));
        assert!(matches!(result, Err(DietError::FileNotFound { .. })));
    }

    #[test]
    fn test_async_strategy_preserves_file_order_across_batches() {
        let mut content = String::from("id,name,tag,carbs,protein,fat,steps,image\n");
        for i in 0..25 {
            content.push_str(&format!("r{},Recipe {},,{},1,1,,\n", i, i, i));
        }
        let file = create_temp_csv(&content);

        // Small batches and several tasks per batch
        let strategy = AsyncLoadStrategy::new(LoadConfig::new(4, 3));
        let recipes = strategy.load(file.path()).unwrap();

        let ids: Vec<String> = recipes.iter().map(|r| r.id.to_string()).collect();
        let expected: Vec<String> = (0..25).map(|i| format!("r{}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_async_strategy_keeps_first_duplicate_across_batches() {
        let file = create_temp_csv(
            "id,name,tag,carbs,protein,fat,steps,image\n\
             a,First,,1,1,1,,\n\
             b,Other,,1,1,1,,\n\
             a,Second,,2,2,2,,\n",
        );

        let strategy = AsyncLoadStrategy::new(LoadConfig::new(1, 2));
        let recipes = strategy.load(file.path()).unwrap();

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].name, "First");
        assert_eq!(recipes[1].name, "Other");
    }

    #[test]
    fn test_async_strategy_skips_malformed_rows() {
        let file = create_temp_csv(
            "id,name,tag,carbs,protein,fat,steps,image\n\
             a,Egg Salad,Salad,5,22,3,,\n\
             b,Broken,,-4,18,8,,\n\
             c,Noodles,Chinese,45,15,7,,\n",
        );

        let strategy = AsyncLoadStrategy::new(LoadConfig::default());
        let recipes = strategy.load(file.path()).unwrap();
        let ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
