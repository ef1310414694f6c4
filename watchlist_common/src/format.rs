//! Display formatting for watchlist rows.
//!
//! Prices are shown with exactly two decimals and locale digit grouping, changes
//! as signed percentages. `parse_displayed_price` reads a previously rendered
//! price back so the next cycle can tell whether the price moved.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Suffix appended to the change text of simulated quotes.
pub const SIMULATED_MARKER: &str = " (sim)";
/// Change text shown when a row could not be updated at all.
pub const UNAVAILABLE_TEXT: &str = "Data unavailable";

/// Digit grouping convention used for prices.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display, EnumString,
)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NumberLocale {
    /// `en-IN`: last three integer digits, then groups of two (`1,23,456.78`).
    #[default]
    Indian,
    /// Groups of three (`123,456.78`).
    Western,
}

impl NumberLocale {
    fn group_size(self) -> usize {
        match self {
            NumberLocale::Indian => 2,
            NumberLocale::Western => 3,
        }
    }
}

/// Visual state of a change field. Rows with a zero change carry neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ChangeClass {
    /// Change above zero.
    Positive,
    /// Change below zero.
    Negative,
}

impl ChangeClass {
    /// Class matching the sign of `change_percent`, or `None` for zero.
    pub fn from_change(change_percent: f64) -> Option<Self> {
        if change_percent > 0.0 {
            Some(ChangeClass::Positive)
        } else if change_percent < 0.0 {
            Some(ChangeClass::Negative)
        } else {
            None
        }
    }
}

/// Format `price` with two decimals and the grouping of `locale`.
pub fn format_price(price: f64, locale: NumberLocale) -> String {
    let fixed = format!("{:.2}", price.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if price < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, group_digits(integer, locale), fraction)
}

fn group_digits(digits: &str, locale: NumberLocale) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let size = locale.group_size();

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Format a change as `+1.23%`, `-1.23%` or `0.00%`, marking simulated values.
pub fn format_change(change_percent: f64, simulated: bool) -> String {
    let sign = match ChangeClass::from_change(change_percent) {
        Some(ChangeClass::Positive) => "+",
        Some(ChangeClass::Negative) => "-",
        None => "",
    };
    let marker = if simulated { SIMULATED_MARKER } else { "" };
    format!("{}{:.2}%{}", sign, change_percent.abs(), marker)
}

/// Read a displayed price back as a number.
///
/// Grouping commas are dropped and the longest leading decimal number is taken,
/// so `"2,650.40"` gives `2650.4` and placeholders such as `"--"` give `None`.
pub fn parse_displayed_price(text: &str) -> Option<f64> {
    let cleaned: String = text.trim_start().chars().filter(|c| *c != ',').collect();
    let bytes = cleaned.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let mut digits = 0;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    cleaned[..end].trim_end_matches('.').parse().ok()
}
