//! Per-record normalization, expansion and type coercion.

pub mod builder;
pub mod coerce;
pub mod dates;
pub mod expand;
pub mod html;
pub mod months;

pub use builder::{build_record, representative_point};
pub use coerce::coerce;
pub use dates::{date_or_sentinel, normalize_date, DateFormatError, INVALID_DATE};
pub use expand::expand;
pub use html::strip_tags;
pub use months::months_from_period;
