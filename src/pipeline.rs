//! Run orchestration: extract, transform, coerce, load.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;
use tracing::info;

use crate::error::EtlError;
use crate::extract::Extractor;
use crate::geocode::GeoResolver;
use crate::load::Warehouse;
use crate::models::{RawItem, ZoneRecord};
use crate::transform::{build_record, coerce, expand, representative_point};

/// Reverse-geocoding lookups in flight at once.
const GEOCODE_CONCURRENCY: usize = 4;

/// Counters for one pipeline run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub fetched: usize,
    pub rows_written: u64,
}

/// Execute one full run: the table is replaced on success, untouched on
/// failure. Retries belong to the invoking scheduler.
pub async fn run<R: GeoResolver>(
    api_url: &str,
    resolver: &R,
    warehouse: &Warehouse,
) -> Result<RunSummary, EtlError> {
    let extractor = Extractor::new();
    let items = extractor.fetch(api_url).await?;
    let fetched = items.len();

    let rows = transform(&items, resolver).await?;
    let rows_written = warehouse.replace(&rows).await?;

    Ok(RunSummary {
        fetched,
        rows_written,
    })
}

/// Transform raw items into coerced warehouse rows.
///
/// Geocoding fans out with bounded concurrency; results come back in input
/// order, so rows for one record stay contiguous. Any single failure aborts
/// the batch.
pub async fn transform<R: GeoResolver>(
    items: &[RawItem],
    resolver: &R,
) -> Result<Vec<Value>, EtlError> {
    let records: Vec<ZoneRecord> = stream::iter(items)
        .map(|item| async move {
            let (lon, lat) = representative_point(&item.geometry)?;
            let location = resolver.resolve(lat, lon).await?;
            build_record(item, &location)
        })
        .buffered(GEOCODE_CONCURRENCY)
        .try_collect()
        .await?;

    info!("Built {} canonical records", records.len());

    let mut rows = Vec::new();
    for record in &records {
        for row in expand(record) {
            let value =
                serde_json::to_value(&row).map_err(|e| EtlError::format(e.to_string()))?;
            rows.push(value);
        }
    }
    coerce(&mut rows);

    info!("Expanded into {} output rows", rows.len());
    Ok(rows)
}
