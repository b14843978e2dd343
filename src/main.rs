//! Diet Dice CLI
//!
//! Command-line interface for managing a recipe file and rolling recipe pairs
//! that approximate a macro-nutrient target.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- add --name "Egg Salad" --tag Salad --carbs 5 --protein 22 --fat 3
//! cargo run -- list --search salad
//! cargo run -- roll --carbs 17 --protein 40 --fat 11
//! cargo run -- --strategy async --batch-size 2000 roll --carbs 60 --protein 40 --fat 20
//! DIETDICE_RECIPES=mine.csv cargo run -- show <ID>
//! ```
//!
//! # Loading Strategies
//!
//! - **sync**: Streaming CSV reader, single-threaded (default)
//! - **async**: Batched reading with concurrent inserts on a tokio runtime
//!
//! # Exit Codes
//!
//! - 0: Success, including a roll with no matching pair
//! - 1: Error (invalid input, unknown recipe, recipe file not readable, etc.)

use dietdice::{cli, commands, logging};
use std::io::Write;
use std::process;

fn main() {
    logging::init_logging();

    let args = cli::parse_args();

    let mut output = std::io::stdout().lock();
    let result = commands::run(&args, &mut output);
    let _ = output.flush();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if e.is_load_failure() {
            eprintln!("Failed to load recipes, please retry.");
        }
        process::exit(1);
    }
}
