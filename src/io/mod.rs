//! I/O module
//!
//! Handles the recipe file and command output.
//!
//! # Components
//!
//! - `csv_format` - Recipe file format (record conversion, serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface
//! - `repository` - Load and save the recipe file through a loading strategy
//! - `report` - Roll reports and recipe details

pub mod async_reader;
pub mod csv_format;
pub mod report;
pub mod repository;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_recipes_csv, CsvRecipeRecord};
pub use report::{write_pair_report, write_recipe_detail, NO_MATCH_MESSAGE};
pub use repository::RecipeRepository;
pub use sync_reader::SyncReader;
