//! Dice roller
//!
//! One "roll" is a single matcher invocation over a snapshot of the recipe
//! collection. The roller optionally waits for a presentational pause before
//! rolling; the pause never influences the outcome.

use crate::core::matcher::PairMatcher;
use crate::types::{MatchOutcome, NutrientTarget, Recipe};
use rand::Rng;
use std::time::Duration;
use tracing::info;

/// Rolls recipe pairs for a target
#[derive(Debug, Clone, Default)]
pub struct DiceRoller {
    matcher: PairMatcher,
    pause: Duration,
}

impl DiceRoller {
    pub fn new(matcher: PairMatcher) -> Self {
        DiceRoller {
            matcher,
            pause: Duration::ZERO,
        }
    }

    /// Set the pause observed by [`DiceRoller::roll_paced`]
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn pause(&self) -> Duration {
        self.pause
    }

    /// Roll immediately
    pub fn roll<R: Rng + ?Sized>(
        &self,
        recipes: &[Recipe],
        target: &NutrientTarget,
        rng: &mut R,
    ) -> MatchOutcome {
        let outcome = self.matcher.pick(recipes, target, rng);
        match outcome.pair() {
            Some(pair) => info!(first = %pair.first.id, second = %pair.second.id, "rolled recipe pair"),
            None => info!(recipes = recipes.len(), "no recipe pair within tolerance"),
        }
        outcome
    }

    /// Wait for the configured pause, then roll
    ///
    /// Requires a tokio runtime with the time driver enabled when the pause
    /// is non-zero.
    pub async fn roll_paced<R: Rng + ?Sized>(
        &self,
        recipes: &[Recipe],
        target: &NutrientTarget,
        rng: &mut R,
    ) -> MatchOutcome {
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
        self.roll(recipes, target, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Macros, RecipeId};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn recipes() -> Vec<Recipe> {
        [("A", "5", "22", "3"), ("B", "12", "18", "8"), ("C", "45", "15", "7")]
            .into_iter()
            .map(|(id, carbs, protein, fat)| {
                Recipe::new(
                    RecipeId::new(id).unwrap(),
                    id,
                    "",
                    Macros::parse(carbs, protein, fat).unwrap(),
                )
                .unwrap()
            })
            .collect()
    }

    fn target() -> NutrientTarget {
        NutrientTarget::from_inputs(Some("17"), Some("40"), Some("11")).unwrap()
    }

    #[test]
    fn test_roll_returns_only_candidate() {
        let roller = DiceRoller::default();
        let outcome = roller.roll(&recipes(), &target(), &mut ChaCha8Rng::seed_from_u64(3));
        let pair = outcome.pair().unwrap();
        assert_eq!(pair.ids().0.as_str(), "A");
        assert_eq!(pair.ids().1.as_str(), "B");
    }

    #[test]
    fn test_roll_with_no_recipes() {
        let roller = DiceRoller::default();
        let outcome = roller.roll(&[], &target(), &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(outcome, MatchOutcome::NoMatch);
    }

    #[tokio::test(start_paused = true)]
    async fn test_roll_paced_waits_then_matches_like_roll() {
        let roller = DiceRoller::default().with_pause(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();

        let paced = roller
            .roll_paced(&recipes(), &target(), &mut ChaCha8Rng::seed_from_u64(11))
            .await;
        assert!(started.elapsed() >= Duration::from_millis(1500));

        let immediate = roller.roll(&recipes(), &target(), &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(paced, immediate);
    }
}
