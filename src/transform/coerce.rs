//! Column type coercion over the assembled table.

use chrono::NaiveDate;
use serde_json::Value;

/// Identifier and free-text columns, stored as TEXT in the warehouse.
pub const TEXT_COLUMNS: &[&str] = &[
    "id",
    "description",
    "name",
    "structure",
    "species_id",
    "practices",
    "months",
    "region",
    "departement",
    "Pays",
];

/// Timestamp columns, stored as DATE in the warehouse.
pub const DATE_COLUMNS: &[&str] = &["create_datetime", "update_datetime"];

/// Coerce every row in place: text columns become JSON strings, date columns
/// are kept in `YYYY-MM-DD` form. Values that already conform are left
/// untouched, so applying this twice equals applying it once.
///
/// Date cells that do not parse (the invalid-date sentinel) stay as they
/// are; the loader decides what to do with them.
pub fn coerce(rows: &mut [Value]) {
    for row in rows.iter_mut() {
        let Some(object) = row.as_object_mut() else {
            continue;
        };
        for column in TEXT_COLUMNS {
            if let Some(cell) = object.get_mut(*column) {
                coerce_text(cell);
            }
        }
        for column in DATE_COLUMNS {
            if let Some(cell) = object.get_mut(*column) {
                coerce_date(cell);
            }
        }
    }
}

fn coerce_text(cell: &mut Value) {
    if !cell.is_string() {
        let text = match cell {
            Value::Null => String::new(),
            ref other => other.to_string(),
        };
        *cell = Value::String(text);
    }
}

fn coerce_date(cell: &mut Value) {
    if let Some(text) = cell.as_str() {
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            *cell = Value::String(date.format("%Y-%m-%d").to_string());
        }
    }
}
