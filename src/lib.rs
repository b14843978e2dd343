//! Diet Dice Library
//! # Overview
//!
//! This library stores recipes with their macro-nutrients and rolls random
//! pairs of recipes whose combined macros land near a user-supplied target.
//! The recipe file can be read with a sync or an async loading strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Recipe, Macros, NutrientTarget, RecipePair, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`commands`] - Command execution (list, show, add, edit, delete, roll)
//! - [`core`] - Business logic components:
//!   - [`core::matcher`] - Pair enumeration and uniform selection
//!   - [`core::dice`] - One roll, with an optional presentational pause
//!   - [`core::recipe_store`] - Recipe CRUD and search
//! - [`io`] - Recipe file readers and writers, reports
//! - [`strategy`] - Pluggable loading strategies
//! - [`logging`] - tracing subscriber setup
//!
//! # Matching Rule
//!
//! A pair {i, j} with i < j is a candidate when its aggregate macros are
//! within all three tolerance bands of the target at once:
//!
//! - **Carbs**: ±20 g
//! - **Protein**: ±10 g
//! - **Fat**: ±10 g
//!
//! One candidate is chosen uniformly at random. An empty candidate list is a
//! normal "no match" outcome, not an error.

// Module declarations
pub mod cli;
pub mod commands;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{
    find_candidates, pick_pair, DiceRoller, InMemoryRecipeStore, PairMatcher, RecipeStore,
};
pub use io::{write_pair_report, write_recipes_csv, RecipeRepository};
pub use types::{
    DietError, MacroDelta, Macros, MatchOutcome, Nutrient, NutrientTarget, Recipe, RecipeId,
    RecipePair, RecipePatch,
};
