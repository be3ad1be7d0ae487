//! Reverse geocoding of zone coordinates to administrative names.

mod cache;
mod nominatim;

pub use cache::CachedResolver;
pub use nominatim::NominatimResolver;

use async_trait::async_trait;

use crate::error::EtlError;

/// Administrative names for a coordinate pair.
///
/// Fields default to the empty string when the geocoder's address has no
/// matching component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminLocation {
    pub region: String,
    pub departement: String,
    pub country: String,
}

/// Resolves a (latitude, longitude) pair to administrative names.
///
/// Injected into the pipeline so tests can substitute a mock and production
/// can layer [`CachedResolver`] over the network client.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    async fn resolve(&self, lat: f64, lon: f64) -> Result<AdminLocation, EtlError>;
}
