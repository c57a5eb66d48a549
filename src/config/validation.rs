//! Configuration validation.
//!
//! Rejects values that would make the exposure or sun calculations
//! meaningless: non-positive ISO, coordinates off the globe, reciprocity
//! parameters that would shorten long exposures.

use anyhow::{Result, bail};

use super::{Config, FilmEntry};
use crate::constants::{DEFAULT_FILM, MAXIMUM_PUSH_PULL_STOPS};
use crate::exposure::film::find_stock;

pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(iso) = config.base_iso
        && !(iso.is_finite() && iso > 0.0)
    {
        bail!("base_iso must be a positive number (got {iso})");
    }

    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        bail!("latitude must be between -90 and 90 degrees (got {lat})");
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        bail!("longitude must be between -180 and 180 degrees (got {lon})");
    }

    if config.latitude.is_some() != config.longitude.is_some() {
        bail!("latitude and longitude must be set together");
    }

    for (name, entry) in &config.films {
        validate_film_entry(name, entry)?;
    }

    if let Some(default_film) = config.default_film.as_deref() {
        if default_film.trim().is_empty() {
            bail!("default_film must not be empty (remove it to use {DEFAULT_FILM})");
        }
        let catalog = config.film_catalog();
        if find_stock(&catalog, default_film).is_none() {
            bail!(
                "default_film '{default_film}' is neither a built-in stock nor defined under [films]"
            );
        }
    }

    Ok(())
}

fn validate_film_entry(name: &str, entry: &FilmEntry) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Film stock names must not be empty");
    }

    if !(entry.iso.is_finite() && entry.iso > 0.0) {
        bail!("films.\"{name}\": iso must be a positive number (got {})", entry.iso);
    }

    if let Some(constant) = entry.reciprocity_constant
        && !(constant.is_finite() && constant >= 1.0)
    {
        bail!("films.\"{name}\": reciprocity_constant must be at least 1.0 (got {constant})");
    }

    if let Some(exponent) = entry.reciprocity_exponent
        && !(exponent.is_finite() && exponent >= 1.0)
    {
        bail!("films.\"{name}\": reciprocity_exponent must be at least 1.0 (got {exponent})");
    }

    if let Some(stops) = entry.push_pull_stops
        && !(stops.is_finite() && stops.abs() <= MAXIMUM_PUSH_PULL_STOPS)
    {
        bail!(
            "films.\"{name}\": push_pull_stops must be between -{MAXIMUM_PUSH_PULL_STOPS} and {MAXIMUM_PUSH_PULL_STOPS} (got {stops})"
        );
    }

    Ok(())
}
