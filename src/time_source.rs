//! Injectable clock.
//!
//! Commands ask this module for "now" instead of calling `Utc::now()`
//! directly, so a `--at` timestamp (or a test) can pin every calculation to
//! one instant.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Format accepted by [`parse_datetime`].
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reads the same instant.
pub struct FixedTimeSource {
    instant: DateTime<Utc>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Install the global time source. Only the first call takes effect.
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Current time from the global source, the system clock by default.
pub fn now() -> DateTime<Utc> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Parse `YYYY-MM-DD HH:MM:SS` as a UTC instant.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT)
        .with_context(|| format!("Invalid datetime '{s}'. Use YYYY-MM-DD HH:MM:SS (UTC)"))?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime("2024-06-21 12:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 21, 12, 30, 0).unwrap());

        assert!(parse_datetime(" 2024-06-21 12:30:00 ").is_ok());
        assert!(parse_datetime("2024-06-21").is_err());
        assert!(parse_datetime("2024-13-01 00:00:00").is_err());
        assert!(parse_datetime("21/06/2024 12:30").is_err());
    }

    #[test]
    fn test_fixed_time_source() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 20, 12, 7, 0).unwrap();
        let source = FixedTimeSource::new(instant);

        assert_eq!(source.now(), instant);
        assert_eq!(source.now(), instant);
    }
}
