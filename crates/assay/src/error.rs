//! Error types for the Assay library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing CSV/TSV data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error, including a malformed dataset definition.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error saving or loading a report.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A statistic was requested over a column with no non-missing values.
    #[error("Column '{column}' has no non-missing values")]
    EmptySample { column: String },

    /// Too few values for a test that needs a minimum sample size.
    #[error("Column '{column}' has {count} non-missing values, at least {required} required")]
    InsufficientSample {
        column: String,
        count: usize,
        required: usize,
    },

    /// A report section could not be produced because a component failed.
    #[error("Could not compute {stage}: {source}")]
    Upstream {
        stage: &'static str,
        #[source]
        source: Box<AssayError>,
    },
}

impl AssayError {
    /// Wrap this error as the cause of a failed report section.
    pub fn upstream(self, stage: &'static str) -> Self {
        AssayError::Upstream {
            stage,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through `Upstream` wrappers.
    pub fn root_cause(&self) -> &AssayError {
        match self {
            AssayError::Upstream { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for Assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;
