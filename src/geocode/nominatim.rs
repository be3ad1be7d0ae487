//! Nominatim reverse-geocoding client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AdminLocation, GeoResolver};
use crate::error::EtlError;

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// One reverse lookup per call against a Nominatim `/reverse` endpoint.
///
/// Wrap in [`super::CachedResolver`] for real runs; this client does no
/// caching of its own.
pub struct NominatimResolver {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    state: Option<String>,
    county: Option<String>,
    country: Option<String>,
}

impl NominatimResolver {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::builder()
                .user_agent("biodiv-etl/0.1 (sensitivity-zone pipeline)")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NominatimResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl GeoResolver for NominatimResolver {
    async fn resolve(&self, lat: f64, lon: f64) -> Result<AdminLocation, EtlError> {
        let url = format!("{}/reverse", self.endpoint);
        let lat_text = lat.to_string();
        let lon_text = lon.to_string();

        let mut attempts = 0;
        let max_attempts = 2;

        loop {
            attempts += 1;

            // Small delay to be nice to the public endpoint
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;

            let result = self
                .client
                .get(&url)
                .query(&[
                    ("format", "jsonv2"),
                    ("lat", lat_text.as_str()),
                    ("lon", lon_text.as_str()),
                ])
                .send()
                .await;

            let failure = match result {
                Ok(response) if response.status().is_success() => {
                    let body: ReverseResponse =
                        response.json().await.map_err(|e| EtlError::Geocode {
                            lat,
                            lon,
                            message: format!("invalid response body: {e}"),
                        })?;

                    let location = AdminLocation {
                        region: body.address.state.unwrap_or_default(),
                        departement: body.address.county.unwrap_or_default(),
                        country: body.address.country.unwrap_or_default(),
                    };
                    debug!("Resolved ({}, {}) to {:?}", lat, lon, location);
                    return Ok(location);
                }
                Ok(response) => format!("status {}", response.status()),
                Err(e) => e.to_string(),
            };

            if attempts >= max_attempts {
                return Err(EtlError::Geocode {
                    lat,
                    lon,
                    message: failure,
                });
            }

            warn!(
                "Reverse geocoding attempt {}/{} failed for ({}, {}): {}",
                attempts, max_attempts, lat, lon, failure
            );
            tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        }
    }
}
