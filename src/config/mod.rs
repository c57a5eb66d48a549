//! Configuration for filmlog: meter calibration, default film, location and
//! custom film stocks.
//!
//! ## Configuration Source
//!
//! `filmlog.toml` is read from **XDG_CONFIG_HOME**/filmlog/ (or the directory
//! passed with `--config`). A commented default file is written the first
//! time [`load`] runs without one.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Exposure]
//! base_iso = 100                 # Meter calibration ISO (>0)
//! default_film = "HP5 Plus"      # Film used when none is named
//!
//! #[Location]
//! latitude = 51.5074             # -90 to 90
//! longitude = -0.1278            # -180 to 180
//!
//! #[Sun times]
//! prefer_remote = false          # Ask sunrise-sunset.org first
//!
//! [films."Fomapan 200"]
//! iso = 200
//! reciprocity_constant = 1.0
//! reciprocity_exponent = 1.5
//! ```
//!
//! Custom stocks are merged over the built-in catalog; a custom entry whose
//! name matches a built-in stock (ignoring case) replaces it.
//!
//! ## Validation
//!
//! Every loaded file goes through [`validation::validate_config`] before it is
//! returned, so callers never see out-of-range values.

pub mod builder;
pub mod loading;
pub mod validation;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_BASE_ISO, DEFAULT_FILM};
use crate::exposure::film::{FilmCharacteristics, FilmStock, builtin_catalog, find_stock};

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// A custom film stock as written in `[films."Name"]`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FilmEntry {
    pub iso: f64,
    /// Defaults to 1.0 (no extra scaling).
    pub reciprocity_constant: Option<f64>,
    /// Defaults to 1.0 (no reciprocity failure).
    pub reciprocity_exponent: Option<f64>,
    pub push_pull_stops: Option<f64>,
}

impl FilmEntry {
    pub fn characteristics(&self) -> FilmCharacteristics {
        FilmCharacteristics {
            iso_rating: self.iso,
            reciprocity_constant: self.reciprocity_constant.unwrap_or(1.0),
            reciprocity_exponent: self.reciprocity_exponent.unwrap_or(1.0),
            push_pull_stops: self.push_pull_stops.unwrap_or(0.0),
        }
    }
}

/// Settings loaded from `filmlog.toml`. Every field is optional.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    pub base_iso: Option<f64>,
    pub default_film: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub prefer_remote: Option<bool>,
    #[serde(default)]
    pub films: BTreeMap<String, FilmEntry>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        get_config_path()
    }

    pub fn base_iso(&self) -> f64 {
        self.base_iso.unwrap_or(DEFAULT_BASE_ISO)
    }

    pub fn prefer_remote(&self) -> bool {
        self.prefer_remote.unwrap_or(false)
    }

    /// Configured coordinates, if both are set.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Built-in stocks with the configured custom stocks merged in.
    pub fn film_catalog(&self) -> Vec<FilmStock> {
        let mut catalog = builtin_catalog();

        for (name, entry) in &self.films {
            let stock = FilmStock::new(name.trim(), entry.characteristics());
            match catalog
                .iter_mut()
                .find(|existing| existing.name.eq_ignore_ascii_case(name.trim()))
            {
                Some(existing) => *existing = stock,
                None => catalog.push(stock),
            }
        }

        catalog
    }

    /// Look up a film by name, or the default film when `name` is `None`.
    ///
    /// # Errors
    ///
    /// Fails when no built-in or custom stock has that name.
    pub fn resolve_film(&self, name: Option<&str>) -> Result<FilmStock> {
        let name = name
            .or(self.default_film.as_deref())
            .unwrap_or(DEFAULT_FILM);
        let catalog = self.film_catalog();

        find_stock(&catalog, name)
            .cloned()
            .with_context(|| format!("Unknown film stock '{name}'. Run 'filmlog films' to list them"))
    }

    /// Log the effective settings.
    pub fn log_config(&self, path: Option<&Path>) {
        if let Some(path) = path {
            log_block_start!("Loaded configuration from {}", loading::private_path(path));
        } else {
            log_block_start!("Using default configuration");
        }
        log_indented!("Base ISO: {}", self.base_iso());
        log_indented!(
            "Default film: {}",
            self.default_film.as_deref().unwrap_or(DEFAULT_FILM)
        );
        match self.coordinates() {
            Some((lat, lon)) => log_indented!("Location: {lat:.4}°, {lon:.4}°"),
            None => log_indented!("Location: not configured"),
        }
        log_indented!(
            "Remote sun times: {}",
            if self.prefer_remote() { "preferred" } else { "off" }
        );
        if !self.films.is_empty() {
            log_indented!("Custom films: {}", self.films.len());
        }
    }
}
