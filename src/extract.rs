//! Source API extraction.

use reqwest::Client;
use tracing::info;

use crate::error::EtlError;
use crate::models::{ApiPage, RawItem};

/// Fetches sensitivity-zone records from the source API.
///
/// One GET per run; the whole result set is materialized before the
/// transform starts. Failures are surfaced to the caller, never retried
/// here.
pub struct Extractor {
    client: Client,
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("biodiv-etl/0.1 (sensitivity-zone pipeline)")
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Fetch one page of records from `endpoint`.
    pub async fn fetch(&self, endpoint: &str) -> Result<Vec<RawItem>, EtlError> {
        info!("Fetching sensitivity zones from {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| EtlError::Network {
                url: endpoint.to_string(),
                source: e,
            })?;

        let body = response.text().await.map_err(|e| EtlError::Network {
            url: endpoint.to_string(),
            source: e,
        })?;

        let page: ApiPage = serde_json::from_str(&body)
            .map_err(|e| EtlError::format(format!("source response: {e}")))?;

        info!("Fetched {} records", page.results.len());
        Ok(page.results)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
