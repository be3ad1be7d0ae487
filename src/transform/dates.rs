//! Date normalization.

use chrono::DateTime;
use thiserror::Error;

/// Diagnostic value stored in place of a date that failed to parse.
///
/// A malformed date corrupts one field instead of aborting the batch;
/// downstream code treats this value as data, and the loader stores it as
/// NULL in the date column.
pub const INVALID_DATE: &str = "invalid date: expected YYYY-MM-DDTHH:MM:SS.ffffff+HH:MM";

const SOURCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("date {input:?} does not match YYYY-MM-DDTHH:MM:SS.ffffff±HH:MM")]
pub struct DateFormatError {
    pub input: String,
}

/// Reduce an ISO-8601 date with offset and microseconds to `YYYY-MM-DD`.
///
/// The date is taken in the source's own offset, not converted to UTC.
pub fn normalize_date(input: &str) -> Result<String, DateFormatError> {
    DateTime::parse_from_str(input, SOURCE_FORMAT)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .map_err(|_| DateFormatError {
            input: input.to_string(),
        })
}

/// Soft-failure variant: malformed dates become [`INVALID_DATE`].
pub fn date_or_sentinel(input: &str) -> String {
    normalize_date(input).unwrap_or_else(|_| INVALID_DATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_well_formed_date() {
        assert_eq!(
            normalize_date("2024-01-01T10:30:00.000000+01:00").unwrap(),
            "2024-01-01"
        );
    }

    #[test]
    fn keeps_source_offset_date() {
        // 23:30 at +02:00 is the next day in UTC; we keep the local date.
        assert_eq!(
            normalize_date("2024-06-30T23:30:00.123456+02:00").unwrap(),
            "2024-06-30"
        );
    }

    #[test]
    fn rejects_malformed_input() {
        let err = normalize_date("not-a-date").unwrap_err();
        assert_eq!(err.input, "not-a-date");
    }

    #[test]
    fn rejects_date_without_microseconds() {
        assert!(normalize_date("2024-01-01T10:30:00+01:00").is_err());
    }

    #[test]
    fn sentinel_never_panics() {
        assert_eq!(date_or_sentinel("not-a-date"), INVALID_DATE);
        assert_eq!(
            date_or_sentinel("2024-01-01T10:30:00.000000+01:00"),
            "2024-01-01"
        );
    }
}
