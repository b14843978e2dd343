//! Asynchronous implementations of core components
//!
//! This module provides thread-safe, concurrent implementations used by the
//! async loading strategy, built on DashMap for locking.
//!
//! - **AsyncRecipeStore**: Thread-safe recipe collection using DashMap
//! - **BatchLoader**: Inserts loaded batches from concurrent tokio tasks

pub mod batch_loader;
pub mod recipe_store;

pub use batch_loader::{BatchLoader, LoadResult};
pub use recipe_store::AsyncRecipeStore;
