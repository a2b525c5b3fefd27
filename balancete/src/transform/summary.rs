//! Summary statistics over the long-format output.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AmountOverflowError;
use crate::models::LongRecord;

/// Tipo of income lines in Tiny ERP exports.
pub const INCOME_TIPO: &str = "Entrada";
/// Tipo of expense lines in Tiny ERP exports.
pub const EXPENSE_TIPO: &str = "Saída";

/// First and last month present in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Per-Tipo figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipoStats {
    pub entries: usize,
    pub subtotal: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

impl TipoStats {
    fn first(valor: Decimal) -> Self {
        Self {
            entries: 1,
            subtotal: valor,
            min: valor,
            max: valor,
        }
    }

    fn add(&mut self, tipo: &str, valor: Decimal) -> Result<(), AmountOverflowError> {
        self.subtotal = self
            .subtotal
            .checked_add(valor)
            .ok_or_else(|| AmountOverflowError::new(format!("Tipo '{}'", tipo)))?;
        self.entries += 1;
        self.min = self.min.min(valor);
        self.max = self.max.max(valor);
        Ok(())
    }
}

/// Statistics computed once over the full set of long records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_entries: usize,
    pub total_value: Decimal,
    /// `None` when there are no records
    pub date_range: Option<DateRange>,
    pub by_tipo: BTreeMap<String, TipoStats>,
    /// Sum of Valor for Tipo "Entrada"
    pub total_income: Decimal,
    /// Sum of Valor for Tipo "Saída"
    pub total_expenses: Decimal,
    pub unique_groups: usize,
    pub unique_categories: usize,
}

impl Summary {
    /// Fails when a subtotal or the grand total leaves the decimal range.
    pub fn from_records(records: &[LongRecord]) -> Result<Self, AmountOverflowError> {
        let mut total_value = Decimal::ZERO;
        let mut date_range: Option<DateRange> = None;
        let mut by_tipo: BTreeMap<String, TipoStats> = BTreeMap::new();
        let mut groups = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for record in records {
            match by_tipo.get_mut(&record.tipo) {
                Some(stats) => stats.add(&record.tipo, record.valor)?,
                None => {
                    by_tipo.insert(record.tipo.clone(), TipoStats::first(record.valor));
                }
            }

            total_value = total_value
                .checked_add(record.valor)
                .ok_or_else(|| AmountOverflowError::new("all records"))?;

            date_range = Some(match date_range {
                None => DateRange {
                    start: record.data,
                    end: record.data,
                },
                Some(range) => DateRange {
                    start: range.start.min(record.data),
                    end: range.end.max(record.data),
                },
            });

            groups.insert(record.grupo.as_str());
            categories.insert(record.categoria.as_str());
        }

        let subtotal = |tipo: &str| {
            by_tipo
                .get(tipo)
                .map(|s| s.subtotal)
                .unwrap_or(Decimal::ZERO)
        };

        Ok(Self {
            total_entries: records.len(),
            total_value,
            date_range,
            total_income: subtotal(INCOME_TIPO),
            total_expenses: subtotal(EXPENSE_TIPO),
            unique_groups: groups.len(),
            unique_categories: categories.len(),
            by_tipo,
        })
    }
}
