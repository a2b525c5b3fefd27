//! High-level pipeline API: read, validate, transform, write.
//!
//! The validator always runs before the transformer, and nothing is written
//! unless both succeed.
//!
//! # Example
//!
//! ```rust,no_run
//! use balancete::{transform_file, TransformOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (result, output) = transform_file(
//!         Path::new("balancete.csv"),
//!         None,
//!         &TransformOptions::default(),
//!     )?;
//!
//!     println!("Wrote {} rows to {}", result.records.len(), output.display());
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{TransformOptions, OUTPUT_SUFFIX};
use crate::error::PipelineError;
use crate::export::write_long_records_file;
use crate::logs::{log_error, log_info, log_success, log_warning};
use crate::models::LongRecord;
use crate::parser::{parse_bytes_auto, parse_csv_file_auto, ParseResult};
use crate::validation::validate_structure;

use super::melt::transform;
use super::summary::Summary;

/// Result of a complete transformation pipeline
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Long-format records, in output order
    pub records: Vec<LongRecord>,

    /// Statistics over `records`
    pub summary: Summary,

    /// CSV parsing metadata
    pub csv_info: CsvInfo,

    /// Month headers that were melted, in file order
    pub month_columns: Vec<String>,

    /// Headers left out of the melt
    pub ignored_columns: Vec<String>,
}

/// CSV file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Output path for an input file: `<stem>_optimized.<ext>` in the same directory.
///
/// Inputs without an extension get `.csv`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());

    input.with_file_name(format!("{}{}.{}", stem, OUTPUT_SUFFIX, extension))
}

/// Read, validate and transform a CSV file. Nothing is written.
pub fn transform_csv(path: &Path, options: &TransformOptions) -> Result<PipelineResult, PipelineError> {
    log_info(format!("Reading input file: {}", path.display()));
    let parse_result = parse_csv_file_auto(path, options.delimiter)?;
    transform_parsed(parse_result, options)
}

/// Same as [`transform_csv`] but from raw bytes.
pub fn transform_bytes(bytes: &[u8], options: &TransformOptions) -> Result<PipelineResult, PipelineError> {
    let parse_result = parse_bytes_auto(bytes, options.delimiter)?;
    transform_parsed(parse_result, options)
}

/// Full run: read `input`, transform it and write the long table.
///
/// The output goes to `output` or, when `None`, to [`output_path_for`]`(input)`.
/// Returns the result together with the path written.
pub fn transform_file(
    input: &Path,
    output: Option<&Path>,
    options: &TransformOptions,
) -> Result<(PipelineResult, PathBuf), PipelineError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_path_for(input));

    let result = transform_csv(input, options).map_err(|e| {
        log_error(format!("Error transforming data: {}", e));
        e
    })?;

    log_info(format!("Saving transformed data to: {}", output.display()));
    write_long_records_file(&output, &result.records, options.write_bom)?;
    log_success(format!("Wrote {} rows", result.records.len()));

    Ok((result, output))
}

/// Validate and transform already-parsed CSV data.
pub fn transform_parsed(
    parse_result: ParseResult,
    options: &TransformOptions,
) -> Result<PipelineResult, PipelineError> {
    let ParseResult {
        table,
        encoding,
        delimiter,
    } = parse_result;

    log_success(format!("Detected encoding: {}", encoding));
    log_success(format!("Detected separator: '{}'", format_delimiter(delimiter)));
    log_success(format!("Read {} rows", table.row_count()));

    let csv_info = CsvInfo {
        encoding,
        delimiter,
        headers: table.headers.clone(),
        row_count: table.row_count(),
    };

    log_info("Validating input structure...");
    let layout = validate_structure(&table, options)?;
    let month_columns: Vec<String> = layout.months.iter().map(|m| m.header.clone()).collect();
    log_success(format!(
        "{} month columns: {}",
        month_columns.len(),
        month_columns.join(", ")
    ));
    if !layout.ignored.is_empty() {
        log_warning(format!(
            "{} columns ignored: {}",
            layout.ignored.len(),
            layout.ignored.join(", ")
        ));
    }

    log_info("Transforming data from wide to long format");
    let transformation = transform(&table, &layout, options)?;
    log_success(format!(
        "Generated {} long records",
        transformation.records.len()
    ));

    Ok(PipelineResult {
        records: transformation.records,
        summary: transformation.summary,
        csv_info,
        month_columns,
        ignored_columns: layout.ignored,
    })
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}
