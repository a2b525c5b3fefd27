//! # Balancete - wide-to-long transformer for Tiny ERP balance sheet exports
//!
//! Tiny ERP exports its "balancete" with one row per category and one column
//! per month (`Jun/23`, `Jul/23`, ...). BI tools such as Looker Studio want
//! one row per category and month instead. This crate does that reshape and
//! enriches each row with calendar attributes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Validator  │────▶│ Transformer │────▶ long CSV
//! │  (wide fmt) │     │  (auto-enc) │     │ (structure) │     │ (melt+stats)│      + summary
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use balancete::{transform_file, TransformOptions};
//! use std::path::Path;
//!
//! let (result, output) = transform_file(Path::new("balancete.csv"), None, &TransformOptions::default())
//!     .unwrap();
//! println!("{} rows written to {}", result.records.len(), output.display());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy (structure, token, value, IO)
//! - [`config`] - Transformation options
//! - [`models`] - Raw table, wide and long records
//! - [`parser`] - CSV reading with encoding/delimiter detection, amount parsing
//! - [`validation`] - Structural checks before any transformation
//! - [`transform`] - Month tokens, melt, summary and pipeline
//! - [`export`] - Long-format CSV writer
//! - [`logs`] - Progress logging over `tracing`

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Logging
pub mod logs;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Output
pub mod export;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    AmountOverflowError, CsvError, OutputError, PipelineError, StructureError, TokenParseError,
    TransformError, ValueParseError,
};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::{DecimalSeparator, RowOrder, TransformOptions, UnknownColumnPolicy, OUTPUT_SUFFIX};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{LongRecord, RawRow, RawTable, WideRecord, IDENTITY_COLUMNS, LONG_HEADERS};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_amount, parse_bytes_auto, parse_csv,
    parse_csv_file_auto, ParseResult,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, validate_structure, ColumnLayout, MonthColumn};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    melt, transform, MonthToken, Summary, TipoStats, Transformation, MONTH_ABBREVIATIONS,
    MONTH_NAMES,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    output_path_for, transform_bytes, transform_csv, transform_file, transform_parsed, CsvInfo,
    PipelineResult,
};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{to_csv_string, write_long_records, write_long_records_file};
