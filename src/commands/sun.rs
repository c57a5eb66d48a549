//! `filmlog sun`: sun position, the day's light windows and the sun path.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::time::Duration;

use crate::geo::display::{log_sun_path, log_sun_position, log_sun_times};
use crate::geo::remote::{SunTimesFetcher, request_url, sun_times_with_fallback};
use crate::geo::{GeoPosition, daily_sun_path, sun_position_at};

/// Remote requests give up after this long and fall back to local times.
const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches sunrise-sunset.org responses over HTTPS.
pub struct HttpSunTimesFetcher {
    client: reqwest::blocking::Client,
}

impl HttpSunTimesFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REMOTE_TIMEOUT)
            .user_agent(concat!("filmlog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl SunTimesFetcher for HttpSunTimesFetcher {
    fn fetch(&self, latitude: f64, longitude: f64, date: NaiveDate) -> Result<String> {
        let url = request_url(latitude, longitude, date);
        log_debug!("Requesting {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .context("Sun times request failed")?;
        if !response.status().is_success() {
            bail!("Sun times service answered HTTP {}", response.status());
        }
        response.text().context("Failed to read sun times response")
    }
}

pub fn handle_sun_command(
    latitude: Option<f64>,
    longitude: Option<f64>,
    at: Option<&str>,
    show_path: bool,
) -> Result<()> {
    let config = super::load_config()?;
    let instant = super::resolve_instant(at)?;

    let Some((lat, lon)) = latitude.zip(longitude).or(config.coordinates()) else {
        bail!("No location. Pass --lat and --lon or set latitude/longitude in filmlog.toml");
    };

    let location = GeoPosition::new(lat, lon, instant)?;
    let tz = location.timezone();
    let date = instant.with_timezone(&tz).date_naive();

    log_version!();
    log_block_start!("Location: {lat:.4}°, {lon:.4}° ({tz})");

    log_sun_position(&sun_position_at(&location), tz);

    let fetcher = if config.prefer_remote() {
        match HttpSunTimesFetcher::new() {
            Ok(fetcher) => Some(fetcher),
            Err(e) => {
                log_warning!("Remote sun times disabled: {e:#}");
                None
            }
        }
    } else {
        None
    };
    let fetcher = fetcher.as_ref().map(|f| f as &dyn SunTimesFetcher);
    log_sun_times(&sun_times_with_fallback(&location, date, fetcher));

    if show_path {
        log_sun_path(&daily_sun_path(&location, date));
    }

    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("sun - Sun position and the day's light");
    log_block_start!("Usage: filmlog sun [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--lat <degrees>        Latitude (default: latitude from config)");
    log_indented!("--lon <degrees>        Longitude (default: longitude from config)");
    log_indented!("--at <datetime>        Instant in UTC, \"YYYY-MM-DD HH:MM:SS\"");
    log_indented!("--path                 Also show the sun path across the day");
    log_block_start!("Shows:");
    log_indented!("Elevation, azimuth and light quality right now");
    log_indented!("Sunrise, sunset, solar noon, golden and blue hour, civil twilight");
    log_block_start!("Examples:");
    log_indented!("filmlog sun --lat 51.5074 --lon -0.1278");
    log_indented!("filmlog sun --at \"2024-06-21 04:00:00\" --path");
    log_end!();
}
