//! Application-wide constants.
//!
//! Numeric tables and astronomical constants live here so the engines, the
//! configuration validator and the tests agree on one set of values.

// # Exposure

/// Standard full-stop apertures, widest first.
pub const STANDARD_APERTURES: [f64; 11] =
    [1.0, 1.4, 2.0, 2.8, 4.0, 5.6, 8.0, 11.0, 16.0, 22.0, 32.0];

/// Standard shutter speeds in seconds, from 1/8000 s to 16 minutes.
pub const STANDARD_SHUTTER_SPEEDS: [f64; 24] = [
    1.0 / 8000.0,
    1.0 / 4000.0,
    1.0 / 2000.0,
    1.0 / 1000.0,
    1.0 / 500.0,
    1.0 / 250.0,
    1.0 / 125.0,
    1.0 / 60.0,
    1.0 / 30.0,
    1.0 / 15.0,
    1.0 / 8.0,
    1.0 / 4.0,
    1.0 / 2.0,
    1.0,
    2.0,
    4.0,
    8.0,
    15.0,
    30.0,
    60.0,
    120.0,
    240.0,
    480.0,
    960.0,
];

/// Number of aperture / shutter suggestions returned per calculation.
pub const CANDIDATE_COUNT: usize = 5;

/// Reciprocity compensation only applies to exposures longer than this.
pub const RECIPROCITY_THRESHOLD_SECONDS: f64 = 1.0;

/// Compensation at or below this is not worth warning about.
pub const RECIPROCITY_WARNING_SECONDS: f64 = 0.5;

/// Compensation above this is reported with high severity.
pub const RECIPROCITY_HIGH_SECONDS: f64 = 2.0;

// # Sun

/// Julian day of the Unix epoch.
pub const JULIAN_DAY_UNIX_EPOCH: f64 = 2_440_587.5;

/// Julian day of the J2000.0 epoch.
pub const JULIAN_DAY_J2000: f64 = 2_451_545.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Elevation band treated as the sun touching the horizon (refraction + disc radius).
pub const HORIZON_BAND_DEGREES: f64 = 0.833;

/// Official zenith for sunrise/sunset.
pub const ZENITH_OFFICIAL: f64 = 90.833;

/// Zenith for civil twilight (-6° elevation).
pub const ZENITH_CIVIL: f64 = 96.0;

/// Samples in one daily sun path.
pub const SUN_PATH_SAMPLES: usize = 96;

/// Spacing between sun path samples.
pub const SUN_PATH_INTERVAL_MINUTES: i64 = 15;

/// Half-width of the window around local noon classified as solar noon.
pub const SOLAR_NOON_WINDOW_MINUTES: i64 = 30;

/// Offset of golden hour from sunrise/sunset, in minutes.
pub const GOLDEN_HOUR_OFFSET_MINUTES: i64 = 60;

/// Offset of blue hour and fallback civil twilight from sunrise/sunset, in minutes.
pub const TWILIGHT_OFFSET_MINUTES: i64 = 30;

// # Moon

/// Mean length of a lunation in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// Reference new moon: 2000-01-06 18:14 UTC, as Unix seconds.
pub const REFERENCE_NEW_MOON_UNIX: i64 = 947_182_440;

// # Configuration

pub const DEFAULT_BASE_ISO: f64 = 100.0;
pub const DEFAULT_FILM: &str = "HP5 Plus";

/// Push/pull processing beyond this many stops is rejected by validation.
pub const MAXIMUM_PUSH_PULL_STOPS: f64 = 4.0;

pub const CONFIG_FILE_NAME: &str = "filmlog.toml";
pub const CONFIG_DIR_NAME: &str = "filmlog";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
