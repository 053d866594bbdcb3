//! Display formatting for survey values.
//!
//! Every function here is total: absent values render as `-` and values that
//! do not parse as numbers fall back to their string form.

use crate::value::Value;

pub const DASH: &str = "-";

/// Whole-number money amount with thousands separators (`1,234`). Halfway
/// values round to even.
pub fn format_currency(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return DASH.to_string();
    };
    match value.as_f64() {
        Some(number) => group_thousands(&format!("{number:.0}")),
        None => value.as_display(),
    }
}

/// Grouped integer for whole numbers, otherwise grouped with two decimals.
pub fn format_number(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return DASH.to_string();
    };
    match value.as_f64() {
        Some(number) if number.fract() == 0.0 => group_thousands(&format!("{number:.0}")),
        Some(number) => group_thousands(&format!("{number:.2}")),
        None => value.as_display(),
    }
}

pub fn value_or_dash(value: Option<&Value>) -> String {
    match value {
        None => DASH.to_string(),
        Some(v) if v.is_empty_text() => DASH.to_string(),
        Some(v) => v.as_display(),
    }
}

fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
