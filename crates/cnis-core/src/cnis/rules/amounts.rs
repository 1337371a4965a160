//! Remuneration amounts in Brazilian notation.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_TOKEN, MONTH_YEAR_ONLY};

/// Parse a Brazilian-formatted amount (`1.234,56`).
///
/// Dots are thousands separators and the comma is the decimal separator.
pub fn parse_brl_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = cleaned.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Remuneration amounts listed on a line, as `(MM/YYYY, amount)` pairs.
///
/// Amounts that do not parse are skipped.
pub fn remunerations_in_line(line: &str) -> Vec<(String, Decimal)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    tokens
        .windows(2)
        .filter(|pair| MONTH_YEAR_ONLY.is_match(pair[0]) && AMOUNT_TOKEN.is_match(pair[1]))
        .filter_map(|pair| parse_brl_amount(pair[1]).map(|amount| (pair[0].to_string(), amount)))
        .collect()
}

/// The last remuneration amount in document order.
pub fn extract_last_salary<'a>(lines: impl IntoIterator<Item = &'a str>) -> Option<Decimal> {
    lines
        .into_iter()
        .flat_map(remunerations_in_line)
        .last()
        .map(|(_, amount)| amount)
}
