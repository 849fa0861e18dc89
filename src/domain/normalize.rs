//! Shared normalization of the localized text fields.
//!
//! The extractor writes money as `R$1.234,56` and the dashboard reads it back,
//! so both sides go through the functions in this module. Bump
//! [`NORMALIZATION_VERSION`] whenever the accepted or emitted format changes.

use crate::utils::error::{EtlError, Result};

/// Version of the money/weight text convention.
pub const NORMALIZATION_VERSION: u32 = 1;

pub const CURRENCY_SYMBOL: &str = "R$";
pub const WEIGHT_UNIT: &str = "kg";

/// `"R$1.234,56"` -> `1234.56`.
///
/// Thousands separators are dropped and the decimal comma becomes a period.
/// If more than one period survives (several commas in the source text) only
/// the last one is kept as the decimal point.
pub fn parse_money(raw: &str) -> Result<f64> {
    let cleaned = raw
        .replace(CURRENCY_SYMBOL, "")
        .replace('.', "")
        .replace(',', ".");
    let cleaned = cleaned.trim();

    let repaired = if cleaned.matches('.').count() > 1 {
        match cleaned.rsplit_once('.') {
            Some((head, tail)) => format!("{}.{}", head.replace('.', ""), tail),
            None => cleaned.to_string(),
        }
    } else {
        cleaned.to_string()
    };

    repaired.parse::<f64>().map_err(|_| EtlError::InvalidMoney {
        value: raw.to_string(),
    })
}

/// `1234.56` -> `"R$1.234,56"`: two decimals, `.` for thousands, `,` for decimals.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{},{}", CURRENCY_SYMBOL, sign, grouped, frac_part)
}

/// `"70kg"` -> `70`. Used by the extractor when averaging.
pub fn parse_weight_int(raw: &str) -> Result<i64> {
    raw.replace(WEIGHT_UNIT, "")
        .trim()
        .parse::<i64>()
        .map_err(|_| EtlError::InvalidWeight {
            value: raw.to_string(),
        })
}

/// `"70.5kg"` -> `70.5`. Looser variant used by the dashboard.
pub fn parse_weight_float(raw: &str) -> Result<f64> {
    raw.replace(WEIGHT_UNIT, "")
        .trim()
        .parse::<f64>()
        .map_err(|_| EtlError::InvalidWeight {
            value: raw.to_string(),
        })
}

/// Rounds to two decimals on the exact binary value, ties to even:
/// `30.125` -> `30.12`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Renders a float the way the summary cells show it: `70.0`, `72.33`.
pub fn display_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// `72.333` -> `"72.33kg"`.
pub fn format_weight(value: f64) -> String {
    format!("{}{}", display_float(round2(value)), WEIGHT_UNIT)
}
