//! Structural validation of wide-format exports.
//!
//! Runs before any transformation. A table passes when:
//!
//! - the identity columns `Tipo`, `Grupo` and `Categoria` are present,
//! - at least one header looks like a month token (`Jun/23`),
//! - every identity cell is non-blank,
//! - every month and `Total` cell is a number or blank.
//!
//! Passing returns the [`ColumnLayout`] the transformer works from, so a
//! table can't be melted without having been validated first.
//!
//! # Example
//!
//! ```
//! use balancete::{validate_structure, RawTable, TransformOptions};
//!
//! let table = RawTable::from_rows(
//!     &["Tipo", "Grupo", "Categoria", "Jun/23", "Total"],
//!     &[vec!["Entrada", "Vendas", "Loja", "100.00", "100.00"]],
//! );
//! let layout = validate_structure(&table, &TransformOptions::default()).unwrap();
//! assert_eq!(layout.months.len(), 1);
//! assert_eq!(layout.total, Some(4));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{TransformOptions, UnknownColumnPolicy};
use crate::error::StructureError;
use crate::logs::log_warning;
use crate::models::{RawTable, CATEGORIA, GRUPO, IDENTITY_COLUMNS, TIPO, TOTAL};
use crate::parser::parse_amount;
use crate::transform::month::MONTH_ABBREVIATIONS;

/// Header pattern for month columns: `<Abbrev>/<YY>`.
static MONTH_HEADER: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"^\s*(?:{})\s*/\s*[0-9]{{2}}\s*$",
        MONTH_ABBREVIATIONS.join("|")
    );
    Regex::new(&pattern).expect("month header pattern is valid")
});

/// Whether a header looks like a month column.
pub fn is_month_header(header: &str) -> bool {
    MONTH_HEADER.is_match(header)
}

/// Whether a header is the optional total column.
pub fn is_total_header(header: &str) -> bool {
    header.trim().eq_ignore_ascii_case(TOTAL)
}

/// A month column as found in the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthColumn {
    pub index: usize,
    pub header: String,
}

/// Positions of the columns a validated table is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub tipo: usize,
    pub grupo: usize,
    pub categoria: usize,
    /// Month columns in file order
    pub months: Vec<MonthColumn>,
    pub total: Option<usize>,
    /// Headers left out of the melt
    pub ignored: Vec<String>,
}

impl ColumnLayout {
    /// Indices of every column holding amounts.
    fn numeric_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.months.iter().map(|m| m.index).chain(self.total)
    }
}

/// Check the table's structure and locate its columns.
///
/// Fails with the first problem found; columns are checked before cells, and
/// cells are checked row by row in file order.
pub fn validate_structure(
    table: &RawTable,
    options: &TransformOptions,
) -> Result<ColumnLayout, StructureError> {
    let layout = locate_columns(table, options)?;

    for row in &table.rows {
        for (name, index) in [
            (TIPO, layout.tipo),
            (GRUPO, layout.grupo),
            (CATEGORIA, layout.categoria),
        ] {
            if row.cell(index).trim().is_empty() {
                return Err(StructureError::EmptyIdentity {
                    line: row.line,
                    column: name.to_string(),
                });
            }
        }

        for index in layout.numeric_columns() {
            let value = row.cell(index);
            if parse_amount(value, options.decimal_separator).is_none() {
                return Err(StructureError::NonNumericValue {
                    line: row.line,
                    column: table.headers[index].clone(),
                    value: value.to_string(),
                });
            }
        }
    }

    Ok(layout)
}

/// Quick check: true when [`validate_structure`] would pass.
pub fn is_valid(table: &RawTable, options: &TransformOptions) -> bool {
    validate_structure(table, options).is_ok()
}

fn locate_columns(
    table: &RawTable,
    options: &TransformOptions,
) -> Result<ColumnLayout, StructureError> {
    let missing: Vec<String> = IDENTITY_COLUMNS
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();

    let (Some(tipo), Some(grupo), Some(categoria)) = (
        table.column_index(TIPO),
        table.column_index(GRUPO),
        table.column_index(CATEGORIA),
    ) else {
        return Err(StructureError::MissingColumn {
            column: missing[0].clone(),
            missing,
        });
    };

    let mut months = Vec::new();
    let mut total = None;
    let mut ignored = Vec::new();

    for (index, header) in table.headers.iter().enumerate() {
        if index == tipo || index == grupo || index == categoria {
            continue;
        }
        if is_month_header(header) {
            months.push(MonthColumn {
                index,
                header: header.clone(),
            });
        } else if is_total_header(header) && total.is_none() {
            total = Some(index);
        } else {
            match options.unknown_columns {
                UnknownColumnPolicy::Reject => {
                    return Err(StructureError::UnknownColumn(header.clone()));
                }
                UnknownColumnPolicy::Ignore => {
                    log_warning(format!("Ignoring unexpected column '{}'", header));
                    ignored.push(header.clone());
                }
            }
        }
    }

    if months.is_empty() {
        return Err(StructureError::NoMonthColumns);
    }

    Ok(ColumnLayout {
        tipo,
        grupo,
        categoria,
        months,
        total,
        ignored,
    })
}
