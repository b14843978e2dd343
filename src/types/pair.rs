//! Pair-matching result types

use super::nutrients::{MacroDelta, Macros, NutrientTarget};
use super::recipe::{Recipe, RecipeId};

/// Two distinct recipes proposed together for one meal
///
/// The pair is unordered: `{a, b}` and `{b, a}` compare equal.
#[derive(Debug, Clone)]
pub struct RecipePair {
    pub first: Recipe,
    pub second: Recipe,
}

impl RecipePair {
    pub fn new(first: Recipe, second: Recipe) -> Self {
        RecipePair { first, second }
    }

    /// Element-wise sum of both recipes' macros
    pub fn aggregate(&self) -> Macros {
        self.first.macros + self.second.macros
    }

    /// Signed `aggregate - target` per nutrient
    pub fn deltas(&self, target: &NutrientTarget) -> MacroDelta {
        self.aggregate().delta(target)
    }

    pub fn ids(&self) -> (&RecipeId, &RecipeId) {
        (&self.first.id, &self.second.id)
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.first.id == *id || self.second.id == *id
    }

    pub fn recipes(&self) -> [&Recipe; 2] {
        [&self.first, &self.second]
    }
}

impl PartialEq for RecipePair {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = self.ids();
        let (c, d) = other.ids();
        (a == c && b == d) || (a == d && b == c)
    }
}

impl Eq for RecipePair {}

/// Outcome of one roll
///
/// `NoMatch` is a normal result, not an error: the caller should suggest
/// different targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(RecipePair),
    NoMatch,
}

impl MatchOutcome {
    pub fn pair(&self) -> Option<&RecipePair> {
        match self {
            MatchOutcome::Matched(pair) => Some(pair),
            MatchOutcome::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn recipe(id: &str, carbs: &str, protein: &str, fat: &str) -> Recipe {
        Recipe::new(
            RecipeId::new(id).unwrap(),
            id,
            "",
            Macros::parse(carbs, protein, fat).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_pair_equality_is_unordered() {
        let a = recipe("a", "1", "1", "1");
        let b = recipe("b", "2", "2", "2");
        let c = recipe("c", "3", "3", "3");

        assert_eq!(
            RecipePair::new(a.clone(), b.clone()),
            RecipePair::new(b.clone(), a.clone())
        );
        assert_ne!(RecipePair::new(a.clone(), b), RecipePair::new(a, c));
    }

    #[test]
    fn test_aggregate_and_deltas() {
        let pair = RecipePair::new(recipe("a", "5", "22", "3"), recipe("b", "12", "18", "8"));
        let target = NutrientTarget::from_inputs(Some("20"), Some("40"), Some("10")).unwrap();

        assert_eq!(pair.aggregate(), Macros::parse("17", "40", "11").unwrap());
        let deltas = pair.deltas(&target);
        assert_eq!(deltas.carbs, Decimal::new(-3, 0));
        assert_eq!(deltas.protein, Decimal::ZERO);
        assert_eq!(deltas.fat, Decimal::new(1, 0));
    }

    #[test]
    fn test_match_outcome_accessors() {
        let pair = RecipePair::new(recipe("a", "1", "1", "1"), recipe("b", "1", "1", "1"));
        let outcome = MatchOutcome::Matched(pair.clone());

        assert!(outcome.is_match());
        assert_eq!(outcome.pair(), Some(&pair));
        assert!(outcome.pair().unwrap().contains(&RecipeId::new("b").unwrap()));
        assert_eq!(MatchOutcome::NoMatch.pair(), None);
    }
}
