//! Free-text genealogical date parsing.
//!
//! Source records carry dates in interchange-style free text ("12 JAN 1900",
//! "ABT 1850", "BET 1880 AND 1885"). Read models keep the raw text verbatim
//! and additionally derive a sortable calendar date where one can be
//! extracted; text that cannot be parsed simply yields no sortable date,
//! never an error.

use chrono::NaiveDate;

/// Qualifier tokens that may precede a date without changing its sort value.
const QUALIFIERS: &[&str] = &["ABT", "EST", "CAL", "BEF", "AFT", "FROM", "TO", "BET"];

const MONTHS: &[(&str, u32)] = &[
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

/// Extracts a sortable date from free-text genealogical date notation.
///
/// Accepted shapes (case-insensitive, optional qualifier prefix):
/// - `12 JAN 1900`
/// - `JAN 1900` (day defaults to 1)
/// - `1900` (January 1st)
/// - `1900-01-12` (ISO)
/// - `BET 1880 AND 1885` (the first date wins)
///
/// Returns `None` when no usable date can be extracted.
pub fn parse_sortable(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    // ISO dates pass through untouched.
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }

    let upper = text.to_ascii_uppercase();
    let tokens: Vec<&str> = upper
        .split_whitespace()
        .skip_while(|t| QUALIFIERS.contains(t))
        .take_while(|t| *t != "AND")
        .collect();

    match tokens.as_slice() {
        [day, month, year] => {
            let day: u32 = day.parse().ok()?;
            NaiveDate::from_ymd_opt(parse_year(year)?, month_number(month)?, day)
        }
        [month, year] => NaiveDate::from_ymd_opt(parse_year(year)?, month_number(month)?, 1),
        [year] => NaiveDate::from_ymd_opt(parse_year(year)?, 1, 1),
        _ => None,
    }
}

fn parse_year(token: &str) -> Option<i32> {
    if !(3..=4).contains(&token.len()) {
        return None;
    }
    token.parse().ok()
}

fn month_number(token: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, n)| *n)
}
