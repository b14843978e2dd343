//! Macro-nutrient types
//!
//! Defines the macro triple shared by recipes and targets, the user-supplied
//! [`NutrientTarget`], and the signed [`MacroDelta`] between an aggregate and
//! a target. All amounts are grams held as exact decimals.

use super::error::DietError;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Upper bound accepted for any single macro field, in grams
pub const MAX_GRAMS: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Deltas at or below this magnitude are highlighted as close to target
pub const CLOSE_DELTA_GRAMS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// One of the three tracked macro-nutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Carbs,
    Protein,
    Fat,
}

impl Nutrient {
    /// All nutrients in display order
    pub const ALL: [Nutrient; 3] = [Nutrient::Carbs, Nutrient::Protein, Nutrient::Fat];

    /// Field name used in CSV headers, CLI flags and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Nutrient::Carbs => "carbs",
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a gram amount from user or file input
///
/// Accepts plain decimal notation with surrounding whitespace. Returns `None`
/// for blank, non-numeric, negative or out-of-range input.
pub fn parse_grams(raw: &str) -> Option<Decimal> {
    let value = Decimal::from_str(raw.trim()).ok()?;
    check_grams(value)
}

fn check_grams(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO || value > MAX_GRAMS {
        None
    } else {
        Some(value.normalize())
    }
}

/// Format a gram amount without trailing zeros
pub fn format_grams(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Format a signed delta, prefixing positive values with `+`
pub fn format_signed_grams(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{}", format_grams(value))
    } else {
        format_grams(value)
    }
}

/// Carbohydrate, protein and fat grams
///
/// Values built through [`Macros::new`] or [`Macros::parse`] are always
/// within `0..=MAX_GRAMS`. Sums produced by `+` are only guaranteed to be
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Macros {
    carbs: Decimal,
    protein: Decimal,
    fat: Decimal,
}

impl Macros {
    /// Create a validated macro triple
    ///
    /// # Errors
    ///
    /// Returns `DietError::InvalidMacro` naming the first field that is
    /// negative or above [`MAX_GRAMS`].
    pub fn new(carbs: Decimal, protein: Decimal, fat: Decimal) -> Result<Self, DietError> {
        let check = |nutrient: Nutrient, value: Decimal| {
            check_grams(value)
                .ok_or_else(|| DietError::invalid_macro(nutrient.name(), &value.to_string()))
        };

        Ok(Macros {
            carbs: check(Nutrient::Carbs, carbs)?,
            protein: check(Nutrient::Protein, protein)?,
            fat: check(Nutrient::Fat, fat)?,
        })
    }

    /// Parse a macro triple from raw strings (CSV fields or CLI flags)
    pub fn parse(carbs: &str, protein: &str, fat: &str) -> Result<Self, DietError> {
        let parse = |nutrient: Nutrient, raw: &str| {
            parse_grams(raw).ok_or_else(|| DietError::invalid_macro(nutrient.name(), raw))
        };

        Ok(Macros {
            carbs: parse(Nutrient::Carbs, carbs)?,
            protein: parse(Nutrient::Protein, protein)?,
            fat: parse(Nutrient::Fat, fat)?,
        })
    }

    pub fn carbs(&self) -> Decimal {
        self.carbs
    }

    pub fn protein(&self) -> Decimal {
        self.protein
    }

    pub fn fat(&self) -> Decimal {
        self.fat
    }

    /// Value for a single nutrient
    pub fn get(&self, nutrient: Nutrient) -> Decimal {
        match nutrient {
            Nutrient::Carbs => self.carbs,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
        }
    }

    /// Replace a single nutrient, validating the new value
    pub fn with(self, nutrient: Nutrient, value: Decimal) -> Result<Self, DietError> {
        let mut next = self;
        let value = check_grams(value)
            .ok_or_else(|| DietError::invalid_macro(nutrient.name(), &value.to_string()))?;
        match nutrient {
            Nutrient::Carbs => next.carbs = value,
            Nutrient::Protein => next.protein = value,
            Nutrient::Fat => next.fat = value,
        }
        Ok(next)
    }

    /// Signed difference `self - target` for each nutrient
    pub fn delta(&self, target: &NutrientTarget) -> MacroDelta {
        let target = target.macros();
        MacroDelta {
            carbs: self.carbs - target.carbs,
            protein: self.protein - target.protein,
            fat: self.fat - target.fat,
        }
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros {
            carbs: self.carbs + other.carbs,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
        }
    }
}

/// Target macros for one roll
///
/// Supplied transiently by the user and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutrientTarget {
    macros: Macros,
}

impl NutrientTarget {
    /// Create a target from already-validated decimals
    pub fn new(carbs: Decimal, protein: Decimal, fat: Decimal) -> Result<Self, DietError> {
        Macros::new(carbs, protein, fat)
            .map(|macros| NutrientTarget { macros })
            .map_err(|e| match e {
                DietError::InvalidMacro { field, value } => DietError::InvalidTarget { field, value },
                other => other,
            })
    }

    /// Validate raw user input before a roll
    ///
    /// Every field must be present, numeric and within range. The matcher is
    /// only ever invoked with a target produced here or by [`NutrientTarget::new`].
    ///
    /// # Errors
    ///
    /// * `DietError::MissingTarget` if a field is absent or blank
    /// * `DietError::InvalidTarget` if a field is non-numeric, negative or too large
    pub fn from_inputs(
        carbs: Option<&str>,
        protein: Option<&str>,
        fat: Option<&str>,
    ) -> Result<Self, DietError> {
        // Missing fields are reported before invalid ones
        for (nutrient, raw) in Nutrient::ALL.into_iter().zip([carbs, protein, fat]) {
            if raw.map_or(true, |value| value.trim().is_empty()) {
                return Err(DietError::missing_target(nutrient.name()));
            }
        }

        let field = |nutrient: Nutrient, raw: Option<&str>| -> Result<Decimal, DietError> {
            let raw = raw.unwrap_or_default();
            parse_grams(raw).ok_or_else(|| DietError::invalid_target(nutrient.name(), raw))
        };

        Ok(NutrientTarget {
            macros: Macros {
                carbs: field(Nutrient::Carbs, carbs)?,
                protein: field(Nutrient::Protein, protein)?,
                fat: field(Nutrient::Fat, fat)?,
            },
        })
    }

    pub fn macros(&self) -> &Macros {
        &self.macros
    }

    pub fn get(&self, nutrient: Nutrient) -> Decimal {
        self.macros.get(nutrient)
    }
}

/// Signed `aggregate - target` difference per nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroDelta {
    pub carbs: Decimal,
    pub protein: Decimal,
    pub fat: Decimal,
}

impl MacroDelta {
    pub fn get(&self, nutrient: Nutrient) -> Decimal {
        match nutrient {
            Nutrient::Carbs => self.carbs,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
        }
    }

    /// Whether a nutrient's delta is small enough to highlight as close
    pub fn is_close(&self, nutrient: Nutrient) -> bool {
        self.get(nutrient).abs() <= CLOSE_DELTA_GRAMS
    }
}
