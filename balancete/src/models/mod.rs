//! Domain models for the balancete transformation pipeline.
//!
//! - [`RawTable`] - the export as read from disk: headers plus string cells
//! - [`WideRecord`] - one validated input row with its monthly amounts
//! - [`LongRecord`] - one (row, month) pair of the melted output
//!
//! All of these are plain values produced by a single pass; nothing here is
//! shared or mutated after construction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::transform::month::MonthToken;

// =============================================================================
// Column names
// =============================================================================

pub const TIPO: &str = "Tipo";
pub const GRUPO: &str = "Grupo";
pub const CATEGORIA: &str = "Categoria";
pub const TOTAL: &str = "Total";

/// Identity columns, in the order they are checked and reported.
pub const IDENTITY_COLUMNS: [&str; 3] = [TIPO, GRUPO, CATEGORIA];

/// Header of the long-format output.
pub const LONG_HEADERS: [&str; 8] = [
    "Data",
    "Ano",
    "Mes",
    "Mes_Nome",
    TIPO,
    GRUPO,
    CATEGORIA,
    "Valor",
];

// =============================================================================
// Raw Table
// =============================================================================

/// A single data row as read from the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line in the source file (the header is line 1)
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    /// Cell at `index`, or `""` when the row is shorter than the header.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Wide-format table: header row plus data rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string slices, numbering rows as if read from a file.
    pub fn from_rows<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>]) -> Self {
        let headers = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, cells)| {
                RawRow::new(
                    i as u64 + 2,
                    cells.iter().map(|c| c.as_ref().to_string()).collect(),
                )
            })
            .collect();
        Self { headers, rows }
    }

    /// Index of the first column with this exact (trimmed) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// =============================================================================
// Wide Record
// =============================================================================

/// One input row after validation, with its amounts parsed.
///
/// `months` is in chronological order regardless of the column order in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideRecord {
    pub line: u64,
    pub tipo: String,
    pub grupo: String,
    pub categoria: String,
    pub months: Vec<(MonthToken, Decimal)>,
    pub total: Option<Decimal>,
}

impl WideRecord {
    /// Sum of the monthly amounts (the `Total` column is not consulted).
    ///
    /// `None` when the sum does not fit in a decimal.
    pub fn month_sum(&self) -> Option<Decimal> {
        self.months
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, v)| acc.checked_add(*v))
    }
}

// =============================================================================
// Long Record
// =============================================================================

/// One row of the long-format output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongRecord {
    /// First day of the month
    #[serde(rename = "Data")]
    pub data: NaiveDate,

    #[serde(rename = "Ano")]
    pub ano: i32,

    /// Month number, 1-12
    #[serde(rename = "Mes")]
    pub mes: u32,

    /// Portuguese month name, e.g. "Junho"
    #[serde(rename = "Mes_Nome")]
    pub mes_nome: &'static str,

    #[serde(rename = "Tipo")]
    pub tipo: String,

    #[serde(rename = "Grupo")]
    pub grupo: String,

    #[serde(rename = "Categoria")]
    pub categoria: String,

    #[serde(rename = "Valor")]
    pub valor: Decimal,
}

impl LongRecord {
    pub fn new(record: &WideRecord, month: MonthToken, valor: Decimal) -> Self {
        Self {
            data: month.first_day(),
            ano: month.year(),
            mes: month.month(),
            mes_nome: month.name(),
            tipo: record.tipo.clone(),
            grupo: record.grupo.clone(),
            categoria: record.categoria.clone(),
            valor,
        }
    }
}
