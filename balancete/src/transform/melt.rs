//! Wide-to-long melt.
//!
//! ```text
//! Tipo     Grupo   Categoria  Jun/23  Jul/23  Total        Data        ... Categoria  Valor
//! Entrada  Vendas  Loja       100.00  200.00  300.00  →    2023-06-01  ... Loja       100.00
//!                                                          2023-07-01  ... Loja       200.00
//! ```
//!
//! Each validated row yields one [`LongRecord`] per month column; `Total` and
//! ignored columns never reach the output.

use rust_decimal::Decimal;

use crate::config::{DecimalSeparator, RowOrder, TransformOptions};
use crate::error::{TokenParseError, TransformResult, ValueParseError};
use crate::models::{LongRecord, RawRow, RawTable, WideRecord};
use crate::parser::parse_amount;
use crate::validation::ColumnLayout;

use super::month::MonthToken;
use super::summary::Summary;

/// Output of a transformation run
#[derive(Debug, Clone)]
pub struct Transformation {
    /// Long-format records in output order
    pub records: Vec<LongRecord>,
    /// Statistics over `records`
    pub summary: Summary,
}

/// A month column with its header already parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedMonthColumn {
    pub index: usize,
    pub token: MonthToken,
}

/// Parse every month header of the layout, once each.
///
/// The result is in chronological order; columns for the same month keep their
/// file order.
pub fn parse_month_columns(
    layout: &ColumnLayout,
) -> Result<Vec<ParsedMonthColumn>, TokenParseError> {
    let mut columns = layout
        .months
        .iter()
        .map(|column| {
            MonthToken::parse(&column.header).map(|token| ParsedMonthColumn {
                index: column.index,
                token,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    columns.sort_by_key(|c| c.token);
    Ok(columns)
}

/// Turn a raw row into a [`WideRecord`], parsing its amounts.
pub fn wide_record(
    row: &RawRow,
    table: &RawTable,
    layout: &ColumnLayout,
    months: &[ParsedMonthColumn],
    separator: DecimalSeparator,
) -> Result<WideRecord, ValueParseError> {
    let amount = |index: usize| -> Result<Decimal, ValueParseError> {
        let value = row.cell(index);
        parse_amount(value, separator).ok_or_else(|| ValueParseError {
            line: row.line,
            column: table.headers[index].clone(),
            value: value.to_string(),
        })
    };

    let values = months
        .iter()
        .map(|column| amount(column.index).map(|v| (column.token, v)))
        .collect::<Result<Vec<_>, _>>()?;

    let total = layout.total.map(amount).transpose()?;

    Ok(WideRecord {
        line: row.line,
        tipo: row.cell(layout.tipo).trim().to_string(),
        grupo: row.cell(layout.grupo).trim().to_string(),
        categoria: row.cell(layout.categoria).trim().to_string(),
        months: values,
        total,
    })
}

/// Long records of a single wide record, chronologically.
pub fn melt(record: &WideRecord) -> impl Iterator<Item = LongRecord> + '_ {
    record
        .months
        .iter()
        .map(move |(month, value)| LongRecord::new(record, *month, *value))
}

/// Melt a validated table into long records and summarise them.
///
/// Produces exactly `rows × month columns` records. Fails on the first month
/// header that is not a token or the first amount that is not a number.
///
/// # Example
///
/// ```
/// use balancete::{transform, validate_structure, RawTable, TransformOptions};
///
/// let table = RawTable::from_rows(
///     &["Tipo", "Grupo", "Categoria", "Jul/23", "Jun/23"],
///     &[vec!["Entrada", "Vendas", "Loja", "200.00", "100.00"]],
/// );
/// let options = TransformOptions::default();
/// let layout = validate_structure(&table, &options).unwrap();
/// let result = transform(&table, &layout, &options).unwrap();
///
/// assert_eq!(result.records.len(), 2);
/// assert_eq!(result.records[0].mes_nome, "Junho");
/// assert_eq!(result.summary.total_value.to_string(), "300.00");
/// ```
pub fn transform(
    table: &RawTable,
    layout: &ColumnLayout,
    options: &TransformOptions,
) -> TransformResult<Transformation> {
    let months = parse_month_columns(layout)?;

    let mut records = Vec::with_capacity(table.row_count() * months.len());
    for row in &table.rows {
        let wide = wide_record(row, table, layout, &months, options.decimal_separator)?;
        records.extend(melt(&wide));
    }

    if options.order == RowOrder::ByDate {
        records.sort_by(|a, b| {
            (a.data, &a.tipo, &a.grupo, &a.categoria).cmp(&(b.data, &b.tipo, &b.grupo, &b.categoria))
        });
    }

    let summary = Summary::from_records(&records)?;
    Ok(Transformation { records, summary })
}
