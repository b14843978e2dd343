//! Loading strategy module for the recipe file
//!
//! This module defines the Strategy pattern for reading the recipe collection,
//! encompassing both CSV parsing and de-duplication into a recipe store. This
//! allows different loading implementations (synchronous, asynchronous batch)
//! to be selected at runtime.

use crate::cli::StrategyType;
use crate::types::{DietError, Recipe};
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncLoadStrategy, LoadConfig};
pub use sync::SyncLoadStrategy;

/// Loading strategy trait for the recipe file
///
/// Each strategy reads recipe rows from a CSV file, validates them, and
/// returns the collection in file order.
pub trait LoadStrategy: Send + Sync {
    /// Load every valid recipe from `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the recipe file
    ///
    /// # Returns
    ///
    /// * `Ok(recipes)` in file order, when the file could be read (malformed
    ///   rows are logged and skipped)
    /// * `Err(DietError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist (`DietError::FileNotFound`)
    /// - The file cannot be opened or read (`DietError::IoError`)
    /// - The header row cannot be parsed (`DietError::ParseError`)
    /// - The async runtime cannot be created (`DietError::RuntimeError`)
    ///
    /// When an id occurs more than once, the first row wins and later rows
    /// are logged.
    fn load(&self, path: &Path) -> Result<Vec<Recipe>, DietError>;
}

/// Create a loading strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of loading strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch loading (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the LoadStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<LoadConfig>,
) -> Box<dyn LoadStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncLoadStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncLoadStrategy::new(config))
        }
    }
}
