//! Canonical and output record types.

use serde::Serialize;

/// Canonical zone record, one per raw API item, before expansion.
///
/// All enrichment is done by the time this exists: markup stripped, dates
/// normalized, administrative names resolved from the representative point.
#[derive(Debug, Clone)]
pub struct ZoneRecord {
    pub id: i64,
    pub description: String,
    pub name: String,
    pub structure: String,
    pub species_id: String,
    pub practices: Vec<String>,
    /// Representative (longitude, latitude) vertex of the zone geometry.
    pub coordinates: (f64, f64),
    /// French month names for the set `period` flags; empty when the source
    /// field is not a 12-flag array.
    pub months: Vec<String>,
    pub region: String,
    pub departement: String,
    pub country: String,
    /// Date-only text, or the invalid-date sentinel.
    pub create_datetime: String,
    pub update_datetime: String,
}

/// One warehouse row: a (record, month, practice) combination.
///
/// Field names match the destination columns, including the historical
/// `Pays` spelling for the country column.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRow {
    pub create_datetime: String,
    pub id: i64,
    pub description: String,
    pub name: String,
    pub structure: String,
    pub species_id: String,
    pub practices: String,
    pub months: String,
    pub region: String,
    pub departement: String,
    #[serde(rename = "Pays")]
    pub country: String,
    pub update_datetime: String,
}
