//! Command execution
//!
//! Each CLI command loads the recipe file through the selected strategy,
//! works on an in-memory store and, for edits, writes the collection back.
//! Output goes to the supplied writer; diagnostics go through `tracing`.

use crate::cli::{AddArgs, CliArgs, Command, EditArgs, RollArgs, StrategyType};
use crate::core::{DiceRoller, InMemoryRecipeStore, RecipeStore};
use crate::io::{
    write_pair_report, write_recipe_detail, write_recipes_csv, RecipeRepository, NO_MATCH_MESSAGE,
};
use crate::strategy::create_strategy;
use crate::types::nutrients::parse_grams;
use crate::types::{
    DietError, Macros, MatchOutcome, Nutrient, NutrientTarget, Recipe, RecipeId, RecipePatch,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Run the parsed command, writing its output to `out`
///
/// # Errors
///
/// Load failures, validation errors and unknown ids are returned to the
/// caller. A roll without a matching pair is not an error.
pub fn run(args: &CliArgs, out: &mut dyn Write) -> Result<(), DietError> {
    let repository = open_repository(args);

    match &args.command {
        Command::List { search } => list(&repository, search.as_deref(), out),
        Command::Show { id } => show(&repository, id, out),
        Command::Add(add_args) => add(&repository, add_args, out),
        Command::Edit(edit_args) => edit(&repository, edit_args, out),
        Command::Delete { id } => delete(&repository, id, out),
        Command::Roll(roll_args) => roll(&repository, roll_args, out),
    }
}

fn open_repository(args: &CliArgs) -> RecipeRepository {
    let config = if matches!(args.strategy, StrategyType::Async) {
        Some(args.to_load_config())
    } else {
        None
    };
    debug!(strategy = ?args.strategy, path = %args.recipes.display(), "opening recipe file");
    RecipeRepository::new(args.recipes.clone(), create_strategy(args.strategy, config))
}

fn load_store(repository: &RecipeRepository) -> Result<InMemoryRecipeStore, DietError> {
    Ok(InMemoryRecipeStore::from_recipes(repository.list_recipes()?))
}

fn list(
    repository: &RecipeRepository,
    search: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), DietError> {
    let store = load_store(repository)?;
    let recipes = store.search(search.unwrap_or_default());
    write_recipes_csv(&recipes, out)
}

fn show(repository: &RecipeRepository, id: &str, out: &mut dyn Write) -> Result<(), DietError> {
    let id = RecipeId::new(id)?;
    let store = load_store(repository)?;
    let recipe = store
        .get(&id)
        .ok_or_else(|| DietError::recipe_not_found(id.as_str()))?;
    write_recipe_detail(&recipe, out)
}

fn add(repository: &RecipeRepository, args: &AddArgs, out: &mut dyn Write) -> Result<(), DietError> {
    let id = match &args.id {
        Some(id) => RecipeId::new(id)?,
        None => RecipeId::generate(),
    };
    let macros = Macros::parse(&args.carbs, &args.protein, &args.fat)?;
    let recipe = Recipe::new(id, &args.name, &args.tag, macros)?
        .with_steps(&args.steps)
        .with_image(args.image.clone());

    let mut store = InMemoryRecipeStore::from_recipes(repository.list_or_empty()?);
    let added = store.add(recipe)?;
    repository.save(&store.list_recipes())?;

    info!(id = %added.id, name = %added.name, "added recipe");
    writeln!(out, "{}", added.id)?;
    Ok(())
}

fn edit(repository: &RecipeRepository, args: &EditArgs, out: &mut dyn Write) -> Result<(), DietError> {
    let id = RecipeId::new(&args.id)?;
    let patch = edit_patch(args)?;

    let mut store = load_store(repository)?;
    if patch.is_empty() {
        let recipe = store
            .get(&id)
            .ok_or_else(|| DietError::recipe_not_found(id.as_str()))?;
        info!(id = %id, "nothing to edit, recipe file left unchanged");
        return write_recipe_detail(&recipe, out);
    }

    let updated = store.update(&id, patch)?;
    repository.save(&store.list_recipes())?;

    info!(id = %updated.id, "updated recipe");
    write_recipe_detail(&updated, out)
}

fn edit_patch(args: &EditArgs) -> Result<RecipePatch, DietError> {
    let grams = |nutrient: Nutrient, raw: &Option<String>| -> Result<Option<Decimal>, DietError> {
        raw.as_deref()
            .map(|raw| parse_grams(raw).ok_or_else(|| DietError::invalid_macro(nutrient.name(), raw)))
            .transpose()
    };

    let steps = if args.clear_steps {
        Some(Vec::new())
    } else if args.steps.is_empty() {
        None
    } else {
        Some(args.steps.clone())
    };

    let image = if args.clear_image {
        Some(None)
    } else {
        args.image.clone().map(Some)
    };

    Ok(RecipePatch {
        name: args.name.clone(),
        tag: args.tag.clone(),
        carbs: grams(Nutrient::Carbs, &args.carbs)?,
        protein: grams(Nutrient::Protein, &args.protein)?,
        fat: grams(Nutrient::Fat, &args.fat)?,
        steps,
        image,
    })
}

fn delete(repository: &RecipeRepository, id: &str, out: &mut dyn Write) -> Result<(), DietError> {
    let id = RecipeId::new(id)?;
    let mut store = load_store(repository)?;
    store.delete(&id)?;
    repository.save(&store.list_recipes())?;

    info!(id = %id, "deleted recipe");
    writeln!(out, "Deleted recipe {}", id)?;
    Ok(())
}

fn roll(repository: &RecipeRepository, args: &RollArgs, out: &mut dyn Write) -> Result<(), DietError> {
    // Validate before touching the recipe file
    let target = NutrientTarget::from_inputs(
        args.carbs.as_deref(),
        args.protein.as_deref(),
        args.fat.as_deref(),
    )?;
    let recipes = repository.list_recipes()?;

    let roller = DiceRoller::default().with_pause(Duration::from_millis(args.pause_ms));
    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let outcome = if roller.pause().is_zero() {
        roller.roll(&recipes, &target, &mut *rng)
    } else {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| DietError::runtime(format!("Failed to create tokio runtime: {}", e)))?;
        runtime.block_on(roller.roll_paced(&recipes, &target, &mut *rng))
    };

    match outcome {
        MatchOutcome::Matched(pair) => write_pair_report(&pair, &target, out),
        MatchOutcome::NoMatch => {
            writeln!(out, "{}", NO_MATCH_MESSAGE)?;
            Ok(())
        }
    }
}
