//! Optional remote sunrise/sunset service with local fallback.
//!
//! The local algorithm in [`super::times`] is always available. A caller that
//! has network access can supply a [`SunTimesFetcher`] returning the body of
//! a sunrise-sunset.org style response (`formatted=0`, ISO-8601 UTC
//! timestamps); [`sun_times_with_fallback`] tries it first and falls back to
//! the local result on any fetch or parse failure. There are no retries here.
//!
//! ```json
//! {
//!   "results": {
//!     "sunrise": "2024-06-21T03:43:08+00:00",
//!     "sunset": "2024-06-21T20:21:39+00:00",
//!     "solar_noon": "2024-06-21T12:02:23+00:00",
//!     "day_length": 59911,
//!     "civil_twilight_begin": "2024-06-21T02:55:21+00:00",
//!     "civil_twilight_end": "2024-06-21T21:09:26+00:00"
//!   },
//!   "status": "OK"
//! }
//! ```

use anyhow::{Context, Result, bail, ensure};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;

use super::GeoPosition;
use super::times::{Daylight, DaylightWindows, SunTimes, SunTimesOrigin, sun_times_in_zone};

/// Base URL of the public sunrise-sunset.org API.
pub const SUNRISE_SUNSET_API: &str = "https://api.sunrise-sunset.org/json";

/// Source of raw remote sun-time responses.
///
/// Implementations own the transport (HTTP client, cache, timeouts).
#[cfg_attr(test, mockall::automock)]
pub trait SunTimesFetcher {
    /// Fetch the response body for `date` at the coordinates.
    fn fetch(&self, latitude: f64, longitude: f64, date: NaiveDate) -> Result<String>;
}

/// Request URL for the sunrise-sunset.org API.
pub fn request_url(latitude: f64, longitude: f64, date: NaiveDate) -> String {
    format!(
        "{SUNRISE_SUNSET_API}?lat={latitude:.6}&lng={longitude:.6}&date={}&formatted=0",
        date.format("%Y-%m-%d")
    )
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    results: Option<ApiResults>,
}

#[derive(Debug, Deserialize)]
struct ApiResults {
    sunrise: String,
    sunset: String,
    solar_noon: String,
    civil_twilight_begin: String,
    civil_twilight_end: String,
}

fn parse_instant(field: &str, value: &str, tz: Tz) -> Result<DateTime<Tz>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid {field} timestamp '{value}'"))?;

    // The service answers polar days and nights with timestamps at the Unix epoch
    if parsed.timestamp() <= 86_400 {
        bail!("Remote {field} is a placeholder ({value}), no rise/set reported");
    }

    Ok(parsed.with_timezone(&tz))
}

/// Parse a remote response into sun times for `date` in `tz`.
///
/// # Errors
///
/// Fails on invalid JSON, a status other than `OK`, missing or unparseable
/// timestamps, placeholder timestamps, or events out of order.
pub fn parse_response(body: &str, date: NaiveDate, tz: Tz) -> Result<SunTimes> {
    let response: ApiResponse =
        serde_json::from_str(body).context("Remote sun times response is not valid JSON")?;

    ensure!(
        response.status == "OK",
        "Remote sun times service returned status {}",
        response.status
    );
    let results = response
        .results
        .context("Remote sun times response has no results")?;

    let sunrise = parse_instant("sunrise", &results.sunrise, tz)?;
    let sunset = parse_instant("sunset", &results.sunset, tz)?;
    let solar_noon = parse_instant("solar_noon", &results.solar_noon, tz)?;
    let civil_begin = parse_instant("civil_twilight_begin", &results.civil_twilight_begin, tz)?;
    let civil_end = parse_instant("civil_twilight_end", &results.civil_twilight_end, tz)?;

    ensure!(
        civil_begin <= sunrise
            && sunrise < solar_noon
            && solar_noon < sunset
            && sunset <= civil_end,
        "Remote sun times are out of order"
    );

    Ok(SunTimes {
        date,
        timezone: tz,
        solar_noon,
        daylight: Daylight::RiseAndSet(DaylightWindows::from_rise_set(
            sunrise,
            sunset,
            None,
            Some((civil_begin, civil_end)),
        )),
        origin: SunTimesOrigin::Remote,
    })
}

/// Sun times from the remote service when possible, else the local algorithm.
///
/// Without a fetcher this is the local calculation.
pub fn sun_times_with_fallback_in_zone(
    location: &GeoPosition,
    date: NaiveDate,
    tz: Tz,
    fetcher: Option<&dyn SunTimesFetcher>,
) -> SunTimes {
    let Some(fetcher) = fetcher else {
        return sun_times_in_zone(location, date, tz);
    };

    let remote = fetcher
        .fetch(location.latitude(), location.longitude(), date)
        .and_then(|body| parse_response(&body, date, tz));

    match remote {
        Ok(times) => times,
        Err(e) => {
            log_warning!("Remote sun times unavailable, using local calculation: {e:#}");
            sun_times_in_zone(location, date, tz)
        }
    }
}

/// [`sun_times_with_fallback_in_zone`] in the coordinates' own timezone.
pub fn sun_times_with_fallback(
    location: &GeoPosition,
    date: NaiveDate,
    fetcher: Option<&dyn SunTimesFetcher>,
) -> SunTimes {
    sun_times_with_fallback_in_zone(location, date, location.timezone(), fetcher)
}
