pub mod raw;
pub mod zone;

pub use raw::{ApiPage, Geometry, LocalizedText, RawItem};
pub use zone::{OutputRow, ZoneRecord};
