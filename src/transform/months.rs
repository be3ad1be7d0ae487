//! Month-flag decoding for the `period` field.

use serde_json::Value;

/// French month names, index-aligned with the 12 `period` flags.
pub const MONTHS: [&str; 12] = [
    "janvier",
    "fevrier",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "decembre",
];

/// Decode `period` into month names.
///
/// Upstream sometimes carries a scalar instead of the 12-flag array; such
/// records get zero months and expand on the practices axis alone.
pub fn months_from_period(period: &Value) -> Vec<String> {
    let Some(flags) = period.as_array() else {
        return Vec::new();
    };
    if flags.len() != 12 {
        return Vec::new();
    }

    flags
        .iter()
        .enumerate()
        .filter(|(_, flag)| is_set(flag))
        .map(|(i, _)| MONTHS[i].to_string())
        .collect()
}

fn is_set(flag: &Value) -> bool {
    match flag {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}
