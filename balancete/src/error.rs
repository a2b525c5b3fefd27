//! Error types for the balancete transformation pipeline.
//!
//! The hierarchy mirrors the stages a run goes through:
//!
//! - [`CsvError`] - reading and decoding the input export
//! - [`StructureError`] - the input table does not have the expected shape
//! - [`TokenParseError`] - a month header cannot be mapped to a calendar month
//! - [`ValueParseError`] - a monthly cell is not a number
//! - [`TransformError`] - anything the transformer itself can fail with
//! - [`OutputError`] - writing the long-format table or the summary
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading the wide-format export.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Content could not be decoded.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// The delimiter cannot be used by the CSV reader.
    #[error("Unsupported delimiter '{0}' (must be a single ASCII character)")]
    InvalidDelimiter(char),

    /// Malformed CSV.
    #[error("Invalid CSV format at line {line}: {message}")]
    ParseError { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,
}

// =============================================================================
// Structure Errors (Validator)
// =============================================================================

/// The wide-format table does not match the expected layout.
///
/// Always reported before any transformation work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// One or more identity columns are absent. `column` is the first one missing.
    #[error("Missing required column: {column} (missing: {})", .missing.join(", "))]
    MissingColumn { column: String, missing: Vec<String> },

    /// No header looks like a month token.
    #[error("No month columns found in the format 'MMM/YY' (e.g. Jun/23)")]
    NoMonthColumns,

    /// An identity cell is blank.
    #[error("Line {line}: empty value in column '{column}'")]
    EmptyIdentity { line: u64, column: String },

    /// A numeric cell holds something that is not a number.
    #[error("Line {line}, column '{column}': value '{value}' is not numeric")]
    NonNumericValue {
        line: u64,
        column: String,
        value: String,
    },

    /// A header is neither an identity, month nor total column (strict mode only).
    #[error("Unexpected column: '{0}'")]
    UnknownColumn(String),
}

impl StructureError {
    /// Name of the column the error is about, when there is one.
    pub fn column(&self) -> Option<&str> {
        match self {
            StructureError::MissingColumn { column, .. }
            | StructureError::EmptyIdentity { column, .. }
            | StructureError::NonNumericValue { column, .. } => Some(column),
            StructureError::UnknownColumn(column) => Some(column),
            StructureError::NoMonthColumns => None,
        }
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// A column header passed validation but is not a usable month token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot parse month header '{header}': {reason}")]
pub struct TokenParseError {
    pub header: String,
    pub reason: String,
}

impl TokenParseError {
    pub fn new(header: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            reason: reason.into(),
        }
    }
}

/// A cell expected to be numeric is neither a number nor empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}, column '{column}': cannot parse '{value}' as a number")]
pub struct ValueParseError {
    pub line: u64,
    pub column: String,
    pub value: String,
}

/// A running sum of Valor left the range of a decimal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Sum of Valor for {scope} is out of range")]
pub struct AmountOverflowError {
    pub scope: String,
}

impl AmountOverflowError {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

/// Errors raised while melting wide rows into long records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error(transparent)]
    Token(#[from] TokenParseError),

    #[error(transparent)]
    Value(#[from] ValueParseError),

    #[error(transparent)]
    Overflow(#[from] AmountOverflowError),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing results.
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error.
    #[error("Failed to write output: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("Failed to serialize CSV: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error.
    #[error("Failed to serialize JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The staged temp file could not be moved to its destination.
    #[error("Failed to move output into place: {0}")]
    PersistError(#[from] tempfile::PersistError),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline::transform_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Input failed validation.
    #[error("StructureError: {0}")]
    Structure(#[from] StructureError),

    /// Transformation failed.
    #[error("{}: {0}", kind_of(.0))]
    Transform(#[from] TransformError),

    /// Output could not be written.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

fn kind_of(err: &TransformError) -> &'static str {
    match err {
        TransformError::Token(_) => "TokenParseError",
        TransformError::Value(_) => "ValueParseError",
        TransformError::Overflow(_) => "AmountOverflowError",
    }
}

impl From<TokenParseError> for PipelineError {
    fn from(err: TokenParseError) -> Self {
        PipelineError::Transform(err.into())
    }
}

impl From<ValueParseError> for PipelineError {
    fn from(err: ValueParseError) -> Self {
        PipelineError::Transform(err.into())
    }
}

impl PipelineError {
    /// Short name of the error kind, as shown to CLI users.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Csv(_) => "CsvError",
            PipelineError::Structure(_) => "StructureError",
            PipelineError::Transform(err) => kind_of(err),
            PipelineError::Output(_) => "OutputError",
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV reading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));
        assert_eq!(pipeline_err.kind(), "CsvError");

        // ValueParseError -> PipelineError
        let value_err = ValueParseError {
            line: 3,
            column: "Jun/23".into(),
            value: "abc".into(),
        };
        let pipeline_err: PipelineError = value_err.into();
        assert_eq!(pipeline_err.kind(), "ValueParseError");
        assert!(pipeline_err.to_string().contains("Jun/23"));
    }

    #[test]
    fn test_overflow_kind() {
        let err: PipelineError = TransformError::from(AmountOverflowError::new("Tipo 'Entrada'")).into();
        assert_eq!(err.kind(), "AmountOverflowError");
        assert_eq!(
            err.to_string(),
            "AmountOverflowError: Sum of Valor for Tipo 'Entrada' is out of range"
        );
    }

    #[test]
    fn test_missing_column_names_first_missing() {
        let err = StructureError::MissingColumn {
            column: "Grupo".into(),
            missing: vec!["Grupo".into(), "Categoria".into()],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Missing required column: Grupo"));
        assert!(msg.contains("Categoria"));
        assert_eq!(err.column(), Some("Grupo"));
    }

    #[test]
    fn test_token_error_kind() {
        let err: PipelineError = TokenParseError::new("Foo/23", "unknown month").into();
        assert_eq!(err.kind(), "TokenParseError");
        assert!(err.to_string().starts_with("TokenParseError:"));
        assert!(err.to_string().contains("Foo/23"));
    }
}
