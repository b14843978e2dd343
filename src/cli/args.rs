use crate::strategy::LoadConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Store recipes and roll pairs that meet a macro-nutrient target
#[derive(Parser, Debug)]
#[command(name = "dietdice")]
#[command(about = "Store recipes and roll pairs that meet a macro-nutrient target", long_about = None)]
pub struct CliArgs {
    /// Recipe file path
    #[arg(
        long = "recipes",
        value_name = "PATH",
        env = "DIETDICE_RECIPES",
        default_value = "recipes.csv",
        global = true,
        help = "Path to the recipe CSV file"
    )]
    pub recipes: PathBuf,

    /// Loading strategy to use for reading the recipe file
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        global = true,
        help = "Loading strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of recipes per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        global = true,
        help = "Number of recipes per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent insert tasks (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        global = true,
        help = "Maximum number of concurrent insert tasks (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available loading strategies for the recipe file
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List recipes as CSV
    List {
        /// Only show recipes whose name or tag contains TERM
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },
    /// Show one recipe in detail
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Add a recipe and print its id
    Add(AddArgs),
    /// Edit fields of an existing recipe
    Edit(EditArgs),
    /// Delete a recipe
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Roll a random pair of recipes matching the target
    Roll(RollArgs),
}

#[derive(Args, Debug, PartialEq)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    /// Explicit id; a UUID is generated when omitted
    #[arg(long)]
    pub id: Option<String>,
    /// Cuisine tag
    #[arg(long, default_value = "")]
    pub tag: String,
    /// Carbohydrate grams
    #[arg(long, allow_hyphen_values = true)]
    pub carbs: String,
    /// Protein grams
    #[arg(long, allow_hyphen_values = true)]
    pub protein: String,
    /// Fat grams
    #[arg(long, allow_hyphen_values = true)]
    pub fat: String,
    /// Preparation step, repeat for each step in order
    #[arg(long = "step", value_name = "STEP")]
    pub steps: Vec<String>,
    /// Image reference (storage key or URL)
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args, Debug, PartialEq)]
pub struct EditArgs {
    #[arg(value_name = "ID")]
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub carbs: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub protein: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub fat: Option<String>,
    /// Replace the step list, repeat for each step in order
    #[arg(long = "step", value_name = "STEP", conflicts_with = "clear_steps")]
    pub steps: Vec<String>,
    /// Remove every step
    #[arg(long)]
    pub clear_steps: bool,
    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<String>,
    /// Remove the image reference
    #[arg(long)]
    pub clear_image: bool,
}

#[derive(Args, Debug, PartialEq)]
pub struct RollArgs {
    /// Target carbohydrate grams
    #[arg(long, allow_hyphen_values = true)]
    pub carbs: Option<String>,
    /// Target protein grams
    #[arg(long, allow_hyphen_values = true)]
    pub protein: Option<String>,
    /// Target fat grams
    #[arg(long, allow_hyphen_values = true)]
    pub fat: Option<String>,
    /// Seed for a reproducible roll
    #[arg(long)]
    pub seed: Option<u64>,
    /// Pause before showing the result, in milliseconds
    #[arg(long = "pause-ms", value_name = "MS", default_value_t = 0)]
    pub pause_ms: u64,
}

impl CliArgs {
    /// Create a LoadConfig from CLI arguments
    ///
    /// Uses the CLI values when provided, or falls back to defaults. Zero
    /// values are replaced by defaults with a warning.
    ///
    /// # Returns
    ///
    /// A `LoadConfig` with values from CLI arguments or defaults.
    pub fn to_load_config(&self) -> LoadConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = LoadConfig::default();
            LoadConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            LoadConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program", "list"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "list"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "list"], StrategyType::Async)]
    #[case::after_subcommand(&["program", "list", "--strategy", "async"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[test]
    fn test_recipes_path_flag() {
        let parsed = CliArgs::try_parse_from(["program", "--recipes", "mine.csv", "list"]).unwrap();
        assert_eq!(parsed.recipes, PathBuf::from("mine.csv"));
    }

    // Individual config option tests
    #[rstest]
    #[case::batch_size(&["program", "--batch-size", "2000", "list"], Some(2000), None)]
    #[case::max_concurrent(&["program", "--max-concurrent", "8", "list"], None, Some(8))]
    #[case::no_options(&["program", "list"], None, None)]
    #[case::all_options(
        &["program", "--strategy", "async", "--batch-size", "2000", "--max-concurrent", "8", "list"],
        Some(2000),
        Some(8)
    )]
    fn test_config_options(
        #[case] args: &[&str],
        #[case] batch_size: Option<usize>,
        #[case] max_concurrent: Option<usize>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.batch_size, batch_size);
        assert_eq!(parsed.max_concurrent_batches, max_concurrent);
    }

    // LoadConfig conversion tests
    #[rstest]
    #[case::all_defaults(&["program", "list"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "--batch-size", "2000", "list"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "--max-concurrent", "8", "list"], 1000, 8)]
    #[case::zero_batch_size(&["program", "--batch-size", "0", "list"], 1000, num_cpus::get())]
    #[case::zero_max_concurrent(&["program", "--max-concurrent", "0", "list"], 1000, num_cpus::get())]
    fn test_load_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_load_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[test]
    fn test_add_command() {
        let parsed = CliArgs::try_parse_from([
            "program", "add", "--name", "Egg Salad", "--tag", "Salad", "--carbs", "5",
            "--protein", "22", "--fat", "3", "--step", "Boil eggs", "--step", "Mix",
        ])
        .unwrap();

        assert_eq!(
            parsed.command,
            Command::Add(AddArgs {
                name: "Egg Salad".into(),
                id: None,
                tag: "Salad".into(),
                carbs: "5".into(),
                protein: "22".into(),
                fat: "3".into(),
                steps: vec!["Boil eggs".into(), "Mix".into()],
                image: None,
            })
        );
    }

    #[test]
    fn test_roll_command_allows_missing_targets() {
        let parsed = CliArgs::try_parse_from(["program", "roll", "--carbs", "20", "--seed", "7"]).unwrap();
        match parsed.command {
            Command::Roll(roll) => {
                assert_eq!(roll.carbs.as_deref(), Some("20"));
                assert_eq!(roll.protein, None);
                assert_eq!(roll.seed, Some(7));
                assert_eq!(roll.pause_ms, 0);
            }
            other => panic!("Expected roll, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_target_reaches_validation() {
        let parsed = CliArgs::try_parse_from(["program", "roll", "--carbs", "-5"]).unwrap();
        match parsed.command {
            Command::Roll(roll) => assert_eq!(roll.carbs.as_deref(), Some("-5")),
            other => panic!("Expected roll, got {:?}", other),
        }
    }

    // Error handling tests
    #[rstest]
    #[case::missing_command(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "list"])]
    #[case::add_without_name(&["program", "add", "--carbs", "1", "--protein", "1", "--fat", "1"])]
    #[case::show_without_id(&["program", "show"])]
    #[case::conflicting_step_flags(&["program", "edit", "a", "--step", "x", "--clear-steps"])]
    #[case::conflicting_image_flags(&["program", "edit", "a", "--image", "x", "--clear-image"])]
    #[case::non_numeric_seed(&["program", "roll", "--seed", "abc"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
