//! Raw API record types.
//!
//! Only the fields the pipeline reads are modelled; anything else in the
//! response is ignored. `geometry.coordinates` and `period` stay as raw JSON
//! because their shape varies between records.

use serde::Deserialize;
use serde_json::Value;

/// One page of the sensitivity-zone API response.
#[derive(Debug, Deserialize)]
pub struct ApiPage {
    pub results: Vec<RawItem>,
}

/// Free text keyed by language; the pipeline reads the French variant.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub fr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Value,
}

/// One sensitivity-zone record as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub id: i64,
    pub description: LocalizedText,
    pub name: LocalizedText,
    pub structure: String,
    #[serde(default)]
    pub species_id: Option<Value>,
    pub practices: Vec<Value>,
    pub geometry: Geometry,
    /// Either a 12-element month-flag array or some other scalar.
    #[serde(default)]
    pub period: Value,
    pub create_datetime: String,
    pub update_datetime: String,
}
