//! Coordinate-keyed cache over a geocoding resolver.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AdminLocation, GeoResolver};
use crate::error::EtlError;

/// Caches resolutions by coordinates rounded to four decimal places
/// (roughly 11 m), so neighbouring zones reuse one lookup within a run.
pub struct CachedResolver<R> {
    inner: R,
    cache: Mutex<HashMap<(i64, i64), AdminLocation>>,
}

impl<R> CachedResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct coordinate keys resolved so far.
    pub fn len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(lat: f64, lon: f64) -> (i64, i64) {
        ((lat * 10_000.0).round() as i64, (lon * 10_000.0).round() as i64)
    }
}

#[async_trait]
impl<R: GeoResolver> GeoResolver for CachedResolver<R> {
    async fn resolve(&self, lat: f64, lon: f64) -> Result<AdminLocation, EtlError> {
        let key = Self::key(lat, lon);

        if let Some(hit) = self.cache.lock().ok().and_then(|c| c.get(&key).cloned()) {
            return Ok(hit);
        }

        let location = self.inner.resolve(lat, lon).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, location.clone());
        }
        Ok(location)
    }
}
