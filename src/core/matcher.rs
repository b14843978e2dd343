//! Recipe pair matching
//!
//! Enumerates every unordered pair `{i, j}` with `i < j` over a recipe
//! collection, keeps the pairs whose aggregate macros fall inside all three
//! tolerance bands around the target, and picks one of them uniformly at
//! random.
//!
//! The enumeration is O(n²) and deterministic: for a fixed collection and
//! target the candidate list is identical on every call. Only the final pick
//! consumes randomness. Candidates are not ranked by closeness.

use crate::types::{MacroDelta, MatchOutcome, NutrientTarget, Recipe, RecipePair};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

/// Maximum absolute carbohydrate deviation, in grams
pub const CARBS_TOLERANCE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Maximum absolute protein deviation, in grams
pub const PROTEIN_TOLERANCE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Maximum absolute fat deviation, in grams
pub const FAT_TOLERANCE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Inclusive ± bands an aggregate must fall within
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToleranceBands {
    pub carbs: Decimal,
    pub protein: Decimal,
    pub fat: Decimal,
}

impl ToleranceBands {
    /// ±20 g carbs, ±10 g protein, ±10 g fat
    pub const DEFAULT: ToleranceBands = ToleranceBands {
        carbs: CARBS_TOLERANCE,
        protein: PROTEIN_TOLERANCE,
        fat: FAT_TOLERANCE,
    };

    /// Whether every nutrient's delta lies inside its band
    pub fn admits(&self, delta: &MacroDelta) -> bool {
        delta.carbs.abs() <= self.carbs
            && delta.protein.abs() <= self.protein
            && delta.fat.abs() <= self.fat
    }
}

impl Default for ToleranceBands {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An accepted pair, as indices into the matched slice
///
/// Always `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidatePair {
    pub first: usize,
    pub second: usize,
}

impl CandidatePair {
    /// Materialise the pair from the slice it was computed against
    pub fn resolve(&self, recipes: &[Recipe]) -> RecipePair {
        RecipePair::new(
            recipes[self.first].clone(),
            recipes[self.second].clone(),
        )
    }
}

/// Pair matcher over a fixed set of tolerance bands
#[derive(Debug, Clone, Copy, Default)]
pub struct PairMatcher {
    bands: ToleranceBands,
}

impl PairMatcher {
    pub fn new(bands: ToleranceBands) -> Self {
        PairMatcher { bands }
    }

    pub fn bands(&self) -> &ToleranceBands {
        &self.bands
    }

    /// Every accepted pair in enumeration order (by `first`, then `second`)
    pub fn candidates(&self, recipes: &[Recipe], target: &NutrientTarget) -> Vec<CandidatePair> {
        let mut candidates = Vec::new();

        for (i, left) in recipes.iter().enumerate() {
            for (offset, right) in recipes[i + 1..].iter().enumerate() {
                let aggregate = left.macros + right.macros;
                if self.bands.admits(&aggregate.delta(target)) {
                    candidates.push(CandidatePair {
                        first: i,
                        second: i + 1 + offset,
                    });
                }
            }
        }

        debug!(
            recipes = recipes.len(),
            candidates = candidates.len(),
            "enumerated recipe pairs"
        );

        candidates
    }

    /// Pick one accepted pair uniformly at random
    ///
    /// Returns `MatchOutcome::NoMatch` when no pair is accepted, which is
    /// always the case for fewer than two recipes.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        recipes: &[Recipe],
        target: &NutrientTarget,
        rng: &mut R,
    ) -> MatchOutcome {
        let candidates = self.candidates(recipes, target);
        if candidates.is_empty() {
            return MatchOutcome::NoMatch;
        }

        let chosen = candidates[rng.gen_range(0..candidates.len())];
        MatchOutcome::Matched(chosen.resolve(recipes))
    }
}

/// Candidate pairs under the default tolerance bands
pub fn find_candidates(recipes: &[Recipe], target: &NutrientTarget) -> Vec<CandidatePair> {
    PairMatcher::default().candidates(recipes, target)
}

/// Pick a pair under the default tolerance bands
pub fn pick_pair<R: Rng + ?Sized>(
    recipes: &[Recipe],
    target: &NutrientTarget,
    rng: &mut R,
) -> MatchOutcome {
    PairMatcher::default().pick(recipes, target, rng)
}
