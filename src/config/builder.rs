//! Default configuration file generation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::loading::private_path;
use crate::constants::{DEFAULT_BASE_ISO, DEFAULT_FILM, MAXIMUM_PUSH_PULL_STOPS};

/// Write a commented default `filmlog.toml` at `path`.
///
/// Location settings are left commented out; the sun command asks for
/// `--lat`/`--lon` until they are filled in.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = ConfigBuilder::new()
        .add_section("Exposure")
        .add_setting(
            "base_iso",
            &format!("{DEFAULT_BASE_ISO}"),
            "Meter calibration ISO (>0)",
        )
        .add_setting(
            "default_film",
            &format!("\"{DEFAULT_FILM}\""),
            "Film used when none is named (see 'filmlog films')",
        )
        .add_section("Location")
        .add_commented_setting("latitude", "51.5074", "Latitude in degrees (-90 to 90)")
        .add_commented_setting("longitude", "-0.1278", "Longitude in degrees (-180 to 180)")
        .add_section("Sun times")
        .add_setting(
            "prefer_remote",
            "false",
            "Ask sunrise-sunset.org first, fall back to local calculation",
        )
        .add_section("Custom film stocks")
        .add_commented_setting("[films.\"Fomapan 200\"]", "", "Merged over the built-in catalog")
        .add_commented_setting("iso", "200", "Box speed (>0)")
        .add_commented_setting("reciprocity_constant", "1.0", "c in c * t^p (>=1)")
        .add_commented_setting("reciprocity_exponent", "1.5", "p in c * t^p (>=1)")
        .add_commented_setting(
            "push_pull_stops",
            "0",
            &format!("Development push/pull (-{MAXIMUM_PUSH_PULL_STOPS} to {MAXIMUM_PUSH_PULL_STOPS})"),
        )
        .build();

    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    Ok(())
}

/// Builds a TOML file with comments aligned in one column.
pub(crate) struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    pub(crate) fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    /// A setting written commented out. An empty value writes the key alone.
    pub(crate) fn add_commented_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        let line = if value.is_empty() {
            format!("#{key}")
        } else {
            format!("#{key} = {value}")
        };
        self.entries.push(ConfigEntry::Setting {
            line,
            comment: format!("# {comment}"),
        });
        self
    }

    pub(crate) fn build(self) -> String {
        let width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for (index, entry) in self.entries.into_iter().enumerate() {
            match entry {
                ConfigEntry::Section(title) => {
                    if index > 0 {
                        lines.push(String::new());
                    }
                    lines.push(title);
                }
                ConfigEntry::Setting { line, comment } => {
                    lines.push(format!("{line:width$}{comment}"));
                }
            }
        }

        let mut content = lines.join("\n");
        content.push('\n');
        content
    }
}
