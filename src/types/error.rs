//! Error types for dietdice
//!
//! This module defines all error types that can occur while loading, editing
//! and matching recipes. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: Recipe file not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed rows, invalid macro values, etc.
//! - **Target Errors**: Missing or non-numeric nutrient targets (upstream validation)
//! - **Store Errors**: Unknown or duplicate recipe identifiers
//!
//! "No matching pair" is deliberately absent: it is a normal outcome of a
//! roll, see [`crate::types::MatchOutcome`].

use thiserror::Error;

/// Main error type for dietdice
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DietError {
    /// Recipe file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing the recipe file
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable while loading: the malformed row is skipped.
    #[error("CSV parse error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A recipe macro field is not a valid non-negative amount of grams
    #[error("Invalid {field} value '{value}': expected grams between 0 and 100000")]
    InvalidMacro {
        /// Macro field name (carbs, protein or fat)
        field: String,
        /// The rejected raw value
        value: String,
    },

    /// A required recipe field is missing or blank
    #[error("Recipe field '{field}' is required")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// A nutrient target was not supplied
    #[error("Please enter all nutrient targets: {field} is missing")]
    MissingTarget {
        /// Target field name (carbs, protein or fat)
        field: String,
    },

    /// A nutrient target is not a usable number
    #[error("Invalid {field} target '{value}': expected grams between 0 and 100000")]
    InvalidTarget {
        /// Target field name (carbs, protein or fat)
        field: String,
        /// The rejected raw value
        value: String,
    },

    /// No recipe with this identifier exists in the store
    #[error("Recipe {id} not found")]
    RecipeNotFound {
        /// The unknown recipe identifier
        id: String,
    },

    /// A recipe with this identifier already exists in the store
    #[error("Recipe {id} already exists")]
    DuplicateRecipe {
        /// The duplicated recipe identifier
        id: String,
    },

    /// The async runtime could not be created or a task failed
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the runtime failure
        message: String,
    },
}

impl From<std::io::Error> for DietError {
    fn from(error: std::io::Error) -> Self {
        DietError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for DietError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        DietError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl DietError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        DietError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a ParseError error
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        DietError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an InvalidMacro error
    pub fn invalid_macro(field: &str, value: &str) -> Self {
        DietError::InvalidMacro {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: &str) -> Self {
        DietError::MissingField {
            field: field.to_string(),
        }
    }

    /// Create a MissingTarget error
    pub fn missing_target(field: &str) -> Self {
        DietError::MissingTarget {
            field: field.to_string(),
        }
    }

    /// Create an InvalidTarget error
    pub fn invalid_target(field: &str, value: &str) -> Self {
        DietError::InvalidTarget {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a RecipeNotFound error
    pub fn recipe_not_found(id: &str) -> Self {
        DietError::RecipeNotFound { id: id.to_string() }
    }

    /// Create a DuplicateRecipe error
    pub fn duplicate_recipe(id: &str) -> Self {
        DietError::DuplicateRecipe { id: id.to_string() }
    }

    /// Create a RuntimeError error
    pub fn runtime(message: impl Into<String>) -> Self {
        DietError::RuntimeError {
            message: message.into(),
        }
    }

    /// Whether this error came from loading the recipe collection
    ///
    /// These are transient from the user's point of view and are presented
    /// with a retry hint.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            DietError::FileNotFound { .. }
                | DietError::IoError { .. }
                | DietError::ParseError { .. }
                | DietError::RuntimeError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        DietError::FileNotFound { path: "recipes.csv".to_string() },
        "File not found: recipes.csv"
    )]
    #[case::io_error(
        DietError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        DietError::ParseError { line: Some(7), message: "Invalid field".to_string() },
        "CSV parse error at line 7: Invalid field"
    )]
    #[case::parse_error_without_line(
        DietError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_macro(
        DietError::InvalidMacro { field: "fat".to_string(), value: "-3".to_string() },
        "Invalid fat value '-3': expected grams between 0 and 100000"
    )]
    #[case::missing_target(
        DietError::MissingTarget { field: "protein".to_string() },
        "Please enter all nutrient targets: protein is missing"
    )]
    #[case::recipe_not_found(
        DietError::RecipeNotFound { id: "42".to_string() },
        "Recipe 42 not found"
    )]
    #[case::duplicate_recipe(
        DietError::DuplicateRecipe { id: "42".to_string() },
        "Recipe 42 already exists"
    )]
    fn test_error_display(#[case] error: DietError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_macro(
        DietError::invalid_macro("carbs", "abc"),
        DietError::InvalidMacro { field: "carbs".to_string(), value: "abc".to_string() }
    )]
    #[case::missing_target(
        DietError::missing_target("fat"),
        DietError::MissingTarget { field: "fat".to_string() }
    )]
    #[case::recipe_not_found(
        DietError::recipe_not_found("x1"),
        DietError::RecipeNotFound { id: "x1".to_string() }
    )]
    fn test_helper_functions(#[case] result: DietError, #[case] expected: DietError) {
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case::file_not_found(DietError::FileNotFound { path: "a".to_string() }, true)]
    #[case::parse(DietError::parse_error(None, "bad"), true)]
    #[case::not_found(DietError::recipe_not_found("a"), false)]
    #[case::missing_target(DietError::missing_target("carbs"), false)]
    fn test_is_load_failure(#[case] error: DietError, #[case] expected: bool) {
        assert_eq!(error.is_load_failure(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: DietError = io_error.into();
        assert!(matches!(error, DietError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
