//! Transformation module.
//!
//! This module handles the wide-to-long reshape:
//! - Month: Portuguese month tokens (`Jun/23`)
//! - Melt: validated wide rows to long records
//! - Summary: statistics over the long records
//! - Pipeline: read, validate, transform and write in one call

pub mod melt;
pub mod month;
pub mod pipeline;
pub mod summary;

pub use melt::{melt, parse_month_columns, transform, wide_record, ParsedMonthColumn, Transformation};
pub use month::{month_name, month_number, MonthToken, MONTH_ABBREVIATIONS, MONTH_NAMES};
pub use pipeline::*;
pub use summary::{DateRange, Summary, TipoStats};
