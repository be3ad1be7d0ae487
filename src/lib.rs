//! Biodiv ETL - sensitivity-zone ingestion pipeline.
//!
//! Fetches sensitivity-zone records from the biodiv-sports API, enriches
//! them with administrative-region names via reverse geocoding, normalizes
//! and expands them, and replaces the warehouse table with the result.

pub mod config;
pub mod error;
pub mod extract;
pub mod geocode;
pub mod load;
pub mod models;
pub mod pipeline;
pub mod transform;

pub use error::EtlError;
pub use geocode::{AdminLocation, GeoResolver};
pub use models::{OutputRow, RawItem, ZoneRecord};
