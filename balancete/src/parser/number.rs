//! Amount parsing for monthly cells.
//!
//! Exports come out of Tiny ERP with either decimal convention depending on
//! the account locale, sometimes with an `R$` prefix or accounting-style
//! parentheses for negatives. Parsing is exact: `"100.00"` keeps its two
//! decimal places.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::DecimalSeparator;

/// Amount used for blank cells. Scale 2 so it prints like the other amounts.
pub fn zero_amount() -> Decimal {
    Decimal::new(0, 2)
}

/// Whether a cell counts as missing.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Parse a monthly amount.
///
/// Blank cells yield [`zero_amount`]. Returns `None` when the cell is not a
/// number under the given separator convention.
pub fn parse_amount(raw: &str, separator: DecimalSeparator) -> Option<Decimal> {
    if is_blank(raw) {
        return Some(zero_amount());
    }

    let compact: String = raw
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let (negative, body) = match compact
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, compact.as_str()),
    };

    let digits = body.strip_prefix(['-', '+']).unwrap_or(body);
    if !digits.chars().any(|c| c.is_ascii_digit())
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let normalized = normalize_separators(body, separator);
    let value = Decimal::from_str(&normalized).ok()?;

    // from_str rounds past 28 fractional digits
    let fraction_digits = normalized.split_once('.').map_or(0, |(_, f)| f.len());
    if (value.scale() as usize) < fraction_digits {
        return None;
    }

    if negative {
        if value.is_sign_negative() {
            return None;
        }
        Some(-value)
    } else {
        Some(value)
    }
}

fn normalize_separators(body: &str, separator: DecimalSeparator) -> String {
    match resolve(body, separator) {
        DecimalSeparator::Comma => body.replace('.', "").replace(',', "."),
        _ => body.replace(',', ""),
    }
}

fn resolve(body: &str, separator: DecimalSeparator) -> DecimalSeparator {
    if separator != DecimalSeparator::Auto {
        return separator;
    }
    match (body.rfind(','), body.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => DecimalSeparator::Comma,
        (Some(_), None) => DecimalSeparator::Comma,
        _ => DecimalSeparator::Dot,
    }
}
