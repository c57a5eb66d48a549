//! Command handlers for the filmlog binary.
//!
//! Each command lives in its own submodule with a `handle_*_command` entry
//! point and a `display_help` used by `filmlog help <command>`.

pub mod exposure;
pub mod films;
pub mod help;
pub mod moon;
pub mod sun;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::Config;
use crate::time_source::{self, FixedTimeSource};

/// Load the configuration, logging where it came from in debug mode.
pub(crate) fn load_config() -> Result<Config> {
    let config = Config::load()?;
    if crate::logger::Log::is_debug() {
        let path = Config::get_config_path().ok();
        config.log_config(path.as_deref());
    }
    Ok(config)
}

/// The instant a command works with: `--at` when given, else the clock.
///
/// A parsed `--at` pins the global time source for the rest of the process.
pub(crate) fn resolve_instant(at: Option<&str>) -> Result<DateTime<Utc>> {
    if let Some(at) = at {
        let instant = time_source::parse_datetime(at)?;
        time_source::init_time_source(Arc::new(FixedTimeSource::new(instant)));
        log_debug!("Using fixed time {instant}");
    }
    Ok(time_source::now())
}
