//! Solar position for a place and instant.
//!
//! Uses the low-precision solar ephemeris from the Astronomical Almanac
//! (accurate to about 0.01° in declination over 1950-2050), which is more
//! than enough for planning a shot.
//!
//! Each [`SunPosition`] also carries a photographic [`SunEvent`] tag derived
//! from the elevation and the local time of day. The elevation bands overlap;
//! rules are checked in a fixed priority order and the first match wins.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use std::f64::consts::PI;
use std::fmt;

use super::{GeoPosition, local_midnight};
use crate::constants::{
    HORIZON_BAND_DEGREES, JULIAN_DAY_J2000, JULIAN_DAY_UNIX_EPOCH, SECONDS_PER_DAY,
    SOLAR_NOON_WINDOW_MINUTES, SUN_PATH_INTERVAL_MINUTES, SUN_PATH_SAMPLES,
};

/// Photographic classification of the sun's current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SunEvent {
    Sunrise,
    Sunset,
    SolarNoon,
    GoldenHour,
    BlueHour,
    CivilTwilight,
    NauticalTwilight,
    AstronomicalTwilight,
}

impl SunEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SunEvent::Sunrise => "sunrise",
            SunEvent::Sunset => "sunset",
            SunEvent::SolarNoon => "solar noon",
            SunEvent::GoldenHour => "golden hour",
            SunEvent::BlueHour => "blue hour",
            SunEvent::CivilTwilight => "civil twilight",
            SunEvent::NauticalTwilight => "nautical twilight",
            SunEvent::AstronomicalTwilight => "astronomical twilight",
        }
    }
}

impl fmt::Display for SunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the sun is at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Degrees clockwise from true north, in [0, 360).
    pub azimuth_degrees: f64,
    /// Degrees above the horizon, in [-90, 90].
    pub elevation_degrees: f64,
    pub timestamp: DateTime<Utc>,
    pub event: Option<SunEvent>,
}

/// Sun positions every 15 minutes over one local day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySunPath {
    pub date: NaiveDate,
    pub timezone: Tz,
    /// Ascending by timestamp.
    pub samples: Vec<SunPosition>,
}

impl DailySunPath {
    /// The sample with the highest elevation.
    pub fn highest(&self) -> Option<&SunPosition> {
        self.samples
            .iter()
            .max_by(|a, b| a.elevation_degrees.total_cmp(&b.elevation_degrees))
    }

    /// Samples carrying the given event tag.
    pub fn with_event(&self, event: SunEvent) -> impl Iterator<Item = &SunPosition> {
        self.samples.iter().filter(move |s| s.event == Some(event))
    }
}

/// Equatorial coordinates of the sun plus the sidereal time they were computed at.
struct SolarCoordinates {
    right_ascension: f64,
    declination: f64,
    gmst: f64,
}

fn julian_day(instant: DateTime<Utc>) -> f64 {
    let unix_seconds =
        instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) / 1e9;
    unix_seconds / SECONDS_PER_DAY + JULIAN_DAY_UNIX_EPOCH
}

/// Fraction of the UT calendar day elapsed. Julian days start at noon.
fn fractional_day(jd: f64) -> f64 {
    (jd + 0.5).rem_euclid(1.0)
}

fn solar_coordinates(instant: DateTime<Utc>) -> SolarCoordinates {
    let jd = julian_day(instant);
    let n = jd - JULIAN_DAY_J2000;

    let mean_longitude = (280.460 + 0.9856474 * n).rem_euclid(360.0).to_radians();
    let mean_anomaly = (357.528 + 0.9856003 * n).rem_euclid(360.0).to_radians();

    let ecliptic_longitude = mean_longitude
        + (1.915 * mean_anomaly.sin() + 0.020 * (2.0 * mean_anomaly).sin()).to_radians();
    let obliquity = (23.439 - 0.0000004 * n).to_radians();

    let right_ascension = (obliquity.cos() * ecliptic_longitude.sin()).atan2(ecliptic_longitude.cos());
    let declination = (obliquity.sin() * ecliptic_longitude.sin())
        .clamp(-1.0, 1.0)
        .asin();

    let gmst_hours = (6.697375 + 0.0657098242 * n + fractional_day(jd) * 24.0).rem_euclid(24.0);
    let gmst = (gmst_hours * 15.0).to_radians();

    SolarCoordinates {
        right_ascension,
        declination,
        gmst,
    }
}

/// Azimuth and elevation in degrees for a place and instant.
fn horizontal_coordinates(latitude: f64, longitude: f64, instant: DateTime<Utc>) -> (f64, f64) {
    let sun = solar_coordinates(instant);
    let lat = latitude.to_radians();

    let local_sidereal = sun.gmst + longitude.to_radians();
    let hour_angle = local_sidereal - sun.right_ascension;

    let sin_elevation =
        lat.sin() * sun.declination.sin() + lat.cos() * sun.declination.cos() * hour_angle.cos();
    let elevation = sin_elevation.clamp(-1.0, 1.0).asin() * 180.0 / PI;

    let azimuth = ((-hour_angle.sin())
        .atan2(sun.declination.tan() * lat.cos() - lat.sin() * hour_angle.cos())
        * 180.0
        / PI)
        .rem_euclid(360.0);

    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    let azimuth = if azimuth >= 360.0 { 0.0 } else { azimuth };

    (azimuth, elevation)
}

/// Classify an elevation at a local time of day.
///
/// Rules in priority order:
/// 1. within ±0.833° of the horizon: sunrise before noon, sunset after
/// 2. above the horizon within ±30 minutes of local noon: solar noon
/// 3. -4° < e < 6°: golden hour
/// 4. -6° < e < -4°: blue hour
/// 5. -6° < e < 0°: civil twilight
/// 6. -12° < e < -6°: nautical twilight
/// 7. -18° < e < -12°: astronomical twilight
pub fn classify_event(elevation: f64, local_time: NaiveTime) -> Option<SunEvent> {
    const NOON_SECONDS: i64 = 12 * 3600;
    let seconds = i64::from(local_time.num_seconds_from_midnight());

    if elevation.abs() <= HORIZON_BAND_DEGREES {
        return Some(if seconds < NOON_SECONDS {
            SunEvent::Sunrise
        } else {
            SunEvent::Sunset
        });
    }
    if elevation > 0.0 && (seconds - NOON_SECONDS).abs() <= SOLAR_NOON_WINDOW_MINUTES * 60 {
        return Some(SunEvent::SolarNoon);
    }

    match elevation {
        e if -4.0 < e && e < 6.0 => Some(SunEvent::GoldenHour),
        e if -6.0 < e && e < -4.0 => Some(SunEvent::BlueHour),
        e if -6.0 < e && e < 0.0 => Some(SunEvent::CivilTwilight),
        e if -12.0 < e && e < -6.0 => Some(SunEvent::NauticalTwilight),
        e if -18.0 < e && e < -12.0 => Some(SunEvent::AstronomicalTwilight),
        _ => None,
    }
}

/// Sun position at the location's instant, classified in `tz` local time.
pub fn sun_position_in_zone(location: &GeoPosition, tz: Tz) -> SunPosition {
    let timestamp = location.timestamp();
    let (azimuth, elevation) =
        horizontal_coordinates(location.latitude(), location.longitude(), timestamp);
    let local_time = timestamp.with_timezone(&tz).time();

    SunPosition {
        azimuth_degrees: azimuth,
        elevation_degrees: elevation,
        timestamp,
        event: classify_event(elevation, local_time),
    }
}

/// Sun position at the location's instant.
///
/// Local time for event classification is the civil time of the zone the
/// coordinates fall in.
pub fn sun_position_at(location: &GeoPosition) -> SunPosition {
    sun_position_in_zone(location, location.timezone())
}

/// Put path samples in timestamp order, however the workers returned them.
pub(crate) fn sort_samples(samples: &mut [SunPosition]) {
    samples.sort_by_key(|sample| sample.timestamp);
}

/// Sun positions every 15 minutes from local midnight of `date`, in `tz`.
///
/// Samples are computed on worker threads and may finish in any order; the
/// returned path is always sorted by timestamp.
pub fn daily_sun_path_in_zone(location: &GeoPosition, date: NaiveDate, tz: Tz) -> DailySunPath {
    let midnight = local_midnight(tz, date).with_timezone(&Utc);
    let instants: Vec<DateTime<Utc>> = (0..SUN_PATH_SAMPLES as i64)
        .map(|i| midnight + Duration::minutes(i * SUN_PATH_INTERVAL_MINUTES))
        .collect();

    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, SUN_PATH_SAMPLES);
    let chunk_size = SUN_PATH_SAMPLES.div_ceil(workers);

    let mut samples: Vec<SunPosition> = std::thread::scope(|scope| {
        let handles: Vec<_> = instants
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&instant| sun_position_in_zone(&location.at(instant), tz))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });
    sort_samples(&mut samples);

    log_debug!(
        "Computed {} sun path samples on {} worker threads",
        samples.len(),
        workers
    );

    DailySunPath {
        date,
        timezone: tz,
        samples,
    }
}

/// Sun positions every 15 minutes across the local day `date`.
pub fn daily_sun_path(location: &GeoPosition, date: NaiveDate) -> DailySunPath {
    daily_sun_path_in_zone(location, date, location.timezone())
}
