//! Maps one raw API item into a canonical zone record.

use serde_json::Value;

use crate::error::EtlError;
use crate::geocode::AdminLocation;
use crate::models::{Geometry, RawItem, ZoneRecord};

use super::dates::date_or_sentinel;
use super::html::strip_tags;
use super::months::months_from_period;

/// Sentinel used when the source record carries no species identifier.
const SPECIES_DEFAULT: &str = "zr";

/// Representative (longitude, latitude) vertex of a zone geometry.
///
/// MultiPolygon: first polygon, first ring, first vertex; anything else:
/// first ring, first vertex. One vertex is enough for the administrative
/// lookup; this is deliberately not a centroid.
pub fn representative_point(geometry: &Geometry) -> Result<(f64, f64), EtlError> {
    let path: &[usize] = if geometry.kind == "MultiPolygon" {
        &[0, 0, 0]
    } else {
        &[0, 0]
    };

    let vertex = nested(&geometry.coordinates, path).ok_or_else(|| {
        EtlError::format(format!(
            "geometry of type {:?} has unexpected coordinate nesting",
            geometry.kind
        ))
    })?;

    let pair = vertex
        .as_array()
        .filter(|p| p.len() >= 2)
        .and_then(|p| Some((p[0].as_f64()?, p[1].as_f64()?)))
        .ok_or_else(|| {
            EtlError::format(format!("geometry vertex is not a [lon, lat] pair: {vertex}"))
        })?;

    Ok(pair)
}

fn nested<'a>(value: &'a Value, path: &[usize]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, &i| v.get(i))
}

/// Build the canonical record for one raw item, given the administrative
/// location already resolved for its representative point.
pub fn build_record(item: &RawItem, location: &AdminLocation) -> Result<ZoneRecord, EtlError> {
    let coordinates = representative_point(&item.geometry)?;

    let species_id = match &item.species_id {
        Some(v) if !v.is_null() => value_to_text(v),
        _ => SPECIES_DEFAULT.to_string(),
    };

    Ok(ZoneRecord {
        id: item.id,
        description: strip_tags(&item.description.fr),
        name: item.name.fr.clone(),
        structure: item.structure.clone(),
        species_id,
        practices: item.practices.iter().map(value_to_text).collect(),
        coordinates,
        months: months_from_period(&item.period),
        region: location.region.clone(),
        departement: location.departement.clone(),
        country: location.country.clone(),
        create_datetime: date_or_sentinel(&item.create_datetime),
        update_datetime: date_or_sentinel(&item.update_datetime),
    })
}

/// Scalar JSON value as column text, without JSON quoting for strings.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
