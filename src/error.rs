//! Error types for the ETL pipeline.

use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// None of these are retried inside the pipeline; retry, if any, belongs to
/// the invoking scheduler. Malformed dates are the one soft failure and are
/// handled by [`crate::transform::date_or_sentinel`] instead of a variant
/// here.
#[derive(Debug, Error)]
pub enum EtlError {
    /// The source API request could not complete.
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response or a record did not have the expected shape.
    #[error("unexpected data shape: {message}")]
    Format { message: String },

    /// Reverse geocoding failed for a record's coordinates.
    #[error("reverse geocoding failed for ({lat}, {lon}): {message}")]
    Geocode { lat: f64, lon: f64, message: String },

    /// The warehouse write failed; the destination table keeps its prior
    /// content.
    #[error("warehouse load failed: {message}")]
    Load { message: String },
}

impl EtlError {
    pub fn format(message: impl Into<String>) -> Self {
        EtlError::Format {
            message: message.into(),
        }
    }

    pub fn load(error: impl std::fmt::Display) -> Self {
        EtlError::Load {
            message: error.to_string(),
        }
    }
}
