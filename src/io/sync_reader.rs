//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over recipes from the recipe file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, unreadable header) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator, with
//!   the line the row starts on
//!
//! ```no_run
//! use dietdice::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("recipes.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(recipe) => println!("{}", recipe.name),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecipeRecord};
use crate::types::{DietError, Recipe};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous recipe file reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
}

impl SyncReader {
    /// Open a recipe file for streaming iteration
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns may be absent)
    ///
    /// # Errors
    ///
    /// * `DietError::FileNotFound` if the file does not exist
    /// * `DietError::IoError` for other open failures
    /// * `DietError::ParseError` if the header row cannot be read
    pub fn new(path: &Path) -> Result<Self, DietError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DietError::file_not_found(path),
            _ => DietError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Recipe, DietError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map(|pos| pos.line());
                let converted = self
                    .record
                    .deserialize::<CsvRecipeRecord>(Some(&self.headers))
                    .map_err(DietError::from)
                    .and_then(convert_csv_record)
                    .map_err(|e| match e {
                        DietError::ParseError { message, .. } => DietError::parse_error(line, message),
                        other => DietError::parse_error(line, other.to_string()),
                    });
                Some(converted)
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent-recipes.csv"));
        assert!(matches!(result, Err(DietError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_reader_reads_recipes_in_order() {
        let file = create_temp_csv(
            "id,name,tag,carbs,protein,fat,steps,image\n\
             a,Egg Salad,Salad,5,22,3,,\n\
             b,Stir Fry,Chinese,12,18,8,\"Chop\nFry\",img/b.jpg\n",
        );

        let recipes: Vec<Recipe> = SyncReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].name, "Egg Salad");
        assert_eq!(recipes[1].steps, vec!["Chop", "Fry"]);
        assert_eq!(recipes[1].image.as_deref(), Some("img/b.jpg"));
    }

    #[test]
    fn test_sync_reader_accepts_missing_optional_columns() {
        let file = create_temp_csv("id,name,carbs,protein,fat\na,Oats,60,10,5\n");

        let recipes: Vec<Recipe> = SyncReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(recipes[0].tag, "");
        assert!(recipes[0].steps.is_empty());
        assert_eq!(recipes[0].image, None);
    }

    #[test]
    fn test_sync_reader_reports_line_of_bad_row() {
        // The quoted steps field spans two lines, so the bad row starts on line 4
        let file = create_temp_csv(
            "id,name,tag,carbs,protein,fat,steps,image\n\
             a,Stir Fry,Chinese,12,18,8,\"Chop\nFry\",\n\
             b,Broken,,-1,2,3,,\n\
             c,Soup,,1,2,3,,\n",
        );

        let results: Vec<_> = SyncReader::new(file.path()).unwrap().collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(DietError::ParseError { line, message }) => {
                assert_eq!(*line, Some(4));
                assert!(message.contains("carbs"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_sync_reader_header_only() {
        let file = create_temp_csv("id,name,tag,carbs,protein,fat,steps,image\n");
        assert_eq!(SyncReader::new(file.path()).unwrap().count(), 0);
    }
}
