//! # filmlog
//!
//! Exposure and light-planning calculations for film photographers.
//!
//! The library holds all of the logic; the `filmlog` binary only parses
//! arguments and calls into it.
//!
//! ## Architecture
//!
//! - **Exposure**: `exposure` turns a metered EV and a film stock into the
//!   nearest standard aperture/shutter settings, with reciprocity correction
//!   for long exposures
//! - **Sun**: `geo` computes solar position, sunrise/sunset with golden hour,
//!   blue hour and civil twilight, and the sun's path across a day
//! - **Moon**: `moon` names the lunar phase for any instant
//! - **Configuration**: `config` loads `filmlog.toml` with custom film stocks
//! - **Commands**: `args` and `commands` implement the CLI
//! - **Infrastructure**: `logger` for structured output, `time_source` for an
//!   injectable clock

#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod exposure;
pub mod geo;
pub mod moon;
pub mod time_source;
