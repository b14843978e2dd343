//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading of recipes from the recipe file for the async
//! loading strategy.
//!
//! # Architecture
//!
//! ```text
//! Recipe file → AsyncReader → Batches of Recipes
//!                  ↓
//!           csv_format module
//!           (CsvRecipeRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecipeRecord};
use crate::types::{DietError, Recipe};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous recipe file reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    skipped: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            skipped: 0,
        }
    }

    /// Read and check the header row
    ///
    /// # Errors
    ///
    /// Returns `DietError::ParseError` if the header row cannot be read, the
    /// same condition `SyncReader::new` treats as fatal.
    pub async fn read_headers(&mut self) -> Result<(), DietError> {
        self.csv_reader
            .headers()
            .await
            .map(|_| ())
            .map_err(|e| DietError::parse_error(Some(1), e.to_string()))
    }

    /// Read a batch of recipes
    ///
    /// Reads up to `batch_size` rows, converting them to recipes. Invalid rows
    /// are logged and skipped; they do not count towards the batch size.
    ///
    /// # Returns
    ///
    /// The successfully converted recipes. An empty vector means the end of
    /// the file was reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Recipe> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecipeRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(recipe) => batch.push(recipe),
                    Err(e) => {
                        self.skipped += 1;
                        warn!(error = %e, "skipping invalid recipe row");
                    }
                },
                Some(Err(e)) => {
                    self.skipped += 1;
                    warn!(error = %e, "skipping malformed recipe row");
                }
                None => break,
            }
        }

        batch
    }

    /// Number of rows skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
