//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `recipe`: Recipe, its identifier and edit patches
//! - `nutrients`: Macro triples, targets and deltas
//! - `pair`: Pair-matching results
//! - `error`: Error types for dietdice

pub mod error;
pub mod nutrients;
pub mod pair;
pub mod recipe;

pub use error::DietError;
pub use nutrients::{MacroDelta, Macros, Nutrient, NutrientTarget};
pub use pair::{MatchOutcome, RecipePair};
pub use recipe::{Recipe, RecipeId, RecipePatch, DEFAULT_IMAGE};
