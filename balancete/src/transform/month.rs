//! Brazilian Portuguese month tokens.
//!
//! Tiny ERP labels monthly columns as `<Abbrev>/<YY>` (e.g. `Jun/23`,
//! `Ago/24`). The abbreviations are looked up in a fixed table rather than
//! through a locale, since several of them (`Fev`, `Abr`, `Mai`, `Ago`,
//! `Set`, `Out`, `Dez`) differ from the English ones.
//!
//! Two-digit years always map to 2000-2099.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::TokenParseError;

/// Month abbreviations as they appear in headers, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Full month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const CENTURY: i32 = 2000;

/// Month number (1-12) for an abbreviation such as `"Ago"`.
pub fn month_number(abbrev: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbrev)
        .map(|i| i as u32 + 1)
}

/// Full Portuguese name of a month number, e.g. `6` -> `"Junho"`.
pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTH_NAMES[month as usize - 1]),
        _ => None,
    }
}

/// A parsed month header.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthToken {
    first_day: NaiveDate,
}

impl MonthToken {
    /// Parse a header like `"Jun/23"`. Surrounding whitespace is ignored.
    pub fn parse(header: &str) -> Result<Self, TokenParseError> {
        let (abbrev, year) = header
            .trim()
            .split_once('/')
            .ok_or_else(|| TokenParseError::new(header, "expected the form MMM/YY"))?;

        let month = month_number(abbrev.trim()).ok_or_else(|| {
            TokenParseError::new(header, format!("unknown month abbreviation '{}'", abbrev.trim()))
        })?;

        let year = year.trim();
        if year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenParseError::new(
                header,
                format!("year '{}' is not two digits", year),
            ));
        }
        let year = year
            .parse::<i32>()
            .map_err(|e| TokenParseError::new(header, e.to_string()))?;

        Self::from_year_month(CENTURY + year, month)
            .ok_or_else(|| TokenParseError::new(header, "not a calendar month"))
    }

    /// Token for a 4-digit year and month number (1-12).
    pub fn from_year_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Full Portuguese month name.
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month0()]
    }

    pub fn abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[self.month0()]
    }

    fn month0(&self) -> usize {
        self.first_day.month0() as usize
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.abbreviation(), self.year() % 100)
    }
}
