//! Recipe file repository
//!
//! Binds a recipe file path to a loading strategy. This is the "recipe store"
//! collaborator seen by commands: listing may fail with a load error that the
//! caller presents as retryable, saving replaces the file atomically.

use crate::io::csv_format::write_recipes_csv;
use crate::strategy::LoadStrategy;
use crate::types::{DietError, Recipe};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Recipe file plus the strategy used to read it
pub struct RecipeRepository {
    path: PathBuf,
    strategy: Box<dyn LoadStrategy>,
}

impl RecipeRepository {
    pub fn new(path: impl Into<PathBuf>, strategy: Box<dyn LoadStrategy>) -> Self {
        Self {
            path: path.into(),
            strategy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every recipe in file order
    ///
    /// # Errors
    ///
    /// Returns `DietError::FileNotFound` if the file does not exist, or any
    /// other fatal load error from the strategy.
    pub fn list_recipes(&self) -> Result<Vec<Recipe>, DietError> {
        let recipes = self.strategy.load(&self.path)?;
        debug!(path = %self.path.display(), count = recipes.len(), "loaded recipes");
        Ok(recipes)
    }

    /// Load every recipe, treating a missing file as an empty collection
    pub fn list_or_empty(&self) -> Result<Vec<Recipe>, DietError> {
        match self.list_recipes() {
            Err(DietError::FileNotFound { .. }) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Replace the file contents with `recipes`
    ///
    /// Writes to a sibling temporary file first and renames it over the
    /// original, so a failed write leaves the previous file intact.
    pub fn save(&self, recipes: &[Recipe]) -> Result<(), DietError> {
        let tmp_path = self.tmp_path();

        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            write_recipes_csv(recipes, &mut writer)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        info!(path = %self.path.display(), count = recipes.len(), "saved recipes");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "recipes.csv".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
