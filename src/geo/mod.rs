//! Sun position, sunrise/sunset and related planning times.
//!
//! ## Module Structure
//!
//! - [`solar`]: Low-precision solar ephemeris, event classification and the
//!   96-sample daily sun path
//! - [`times`]: Sunrise/sunset, golden/blue hour and civil twilight for a
//!   calendar day, with explicit polar day/night reporting
//! - [`timezone`]: Coordinate to timezone lookup that defines "local" time
//! - [`remote`]: Optional remote sunrise/sunset service with local fallback
//! - [`display`]: Log rendering of sun times and paths
//!
//! All calculations are pure functions of a [`GeoPosition`] (and a date
//! where relevant). Nothing here performs I/O except through a caller-supplied
//! [`remote::SunTimesFetcher`].

pub mod display;
pub mod remote;
pub mod solar;
pub mod times;
pub mod timezone;

use anyhow::{Result, ensure};
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

pub use solar::{DailySunPath, SunEvent, SunPosition, daily_sun_path, sun_position_at};
pub use times::{Daylight, DaylightWindows, SunTimes, SunTimesOrigin, sun_times_for_day};
pub use timezone::determine_timezone_from_coordinates;

#[cfg(test)]
mod tests;

/// A validated location on Earth at a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    latitude_degrees: f64,
    longitude_degrees: f64,
    timestamp: DateTime<Utc>,
}

impl GeoPosition {
    /// Create a position from signed decimal degrees.
    ///
    /// # Errors
    ///
    /// Latitude must be within [-90, 90] and longitude within [-180, 180].
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Result<Self> {
        ensure!(
            (-90.0..=90.0).contains(&latitude),
            "latitude must be between -90 and 90 degrees (got {latitude})"
        );
        ensure!(
            (-180.0..=180.0).contains(&longitude),
            "longitude must be between -180 and 180 degrees (got {longitude})"
        );

        Ok(Self {
            latitude_degrees: latitude,
            longitude_degrees: longitude,
            timestamp,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude_degrees
    }

    pub fn longitude(&self) -> f64 {
        self.longitude_degrees
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The same place at another instant.
    pub fn at(&self, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, ..*self }
    }

    /// Civil timezone of the coordinates.
    pub fn timezone(&self) -> Tz {
        determine_timezone_from_coordinates(self.latitude_degrees, self.longitude_degrees)
    }
}

/// Resolve a wall-clock time on `date` in `tz` to an instant.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times that
/// do not exist (clocks going forward) move forward by the size of the gap.
pub(crate) fn resolve_local(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // The offset in force just before the gap maps the wall time past it
            match tz.offset_from_local_datetime(&(naive - Duration::hours(3))) {
                LocalResult::Single(offset) | LocalResult::Ambiguous(offset, _) => {
                    let utc_offset = Duration::seconds(i64::from(offset.fix().local_minus_utc()));
                    tz.from_utc_datetime(&(naive - utc_offset))
                }
                LocalResult::None => tz.from_utc_datetime(&naive),
            }
        }
    }
}

/// Local midnight at the start of `date`.
pub(crate) fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    resolve_local(tz, date, NaiveTime::MIN)
}
