//! Core business logic module
//!
//! This module contains the recipe planning components:
//! - `traits` - Trait abstractions for interchangeable recipe stores
//! - `matcher` - Pair matching within tolerance bands
//! - `dice` - One roll per user request, with optional presentational pause
//! - `recipe_store` - Single-threaded recipe collection
//! - `async` - Concurrent store and batch loader

pub mod r#async;
pub mod dice;
pub mod matcher;
pub mod recipe_store;
pub mod traits;

pub use dice::DiceRoller;
pub use matcher::{find_candidates, pick_pair, CandidatePair, PairMatcher, ToleranceBands};
pub use r#async::{AsyncRecipeStore, BatchLoader};
pub use recipe_store::InMemoryRecipeStore;
pub use traits::RecipeStore;
