//! Transformation options.
//!
//! Every knob the pipeline understands lives in [`TransformOptions`]. The CLI
//! maps its flags onto this struct; library callers build it directly or start
//! from [`TransformOptions::default`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Suffix appended to the input file stem to name the output file.
pub const OUTPUT_SUFFIX: &str = "_optimized";

/// Which character separates the integer and fractional parts of amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    /// Decide per cell: the right-most of `.` / `,` wins, a lone `,` is decimal.
    #[default]
    Auto,
    /// `1,234.56`
    Dot,
    /// `1.234,56`
    Comma,
}

/// What to do with headers that are neither identity, month nor `Total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnknownColumnPolicy {
    /// Log a warning and leave the column out of the melt.
    #[default]
    Ignore,
    /// Fail validation with a `StructureError`.
    Reject,
}

/// Order of the emitted long records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RowOrder {
    /// Input row order, then chronological within each row.
    #[default]
    Source,
    /// Sorted by (Data, Tipo, Grupo, Categoria).
    ByDate,
}

/// Options for the transformation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Decimal convention of the monthly amounts
    pub decimal_separator: DecimalSeparator,

    /// Policy for unrecognised columns
    pub unknown_columns: UnknownColumnPolicy,

    /// Ordering of the output rows
    pub order: RowOrder,

    /// Input delimiter (auto-detect if not specified)
    pub delimiter: Option<char>,

    /// Prefix the output with a UTF-8 byte order mark
    pub write_bom: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            decimal_separator: DecimalSeparator::Auto,
            unknown_columns: UnknownColumnPolicy::Ignore,
            order: RowOrder::Source,
            delimiter: None,
            write_bom: true,
        }
    }
}
