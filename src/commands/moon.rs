//! `filmlog moon`: moon phase and illumination.

use anyhow::Result;

use crate::moon::moon_state_at;

pub fn handle_moon_command(at: Option<&str>) -> Result<()> {
    let instant = super::resolve_instant(at)?;
    let state = moon_state_at(instant);

    log_version!();
    log_block_start!("Moon at {} UTC", instant.format("%Y-%m-%d %H:%M"));
    log_indented!("Phase: {}", state.phase);
    log_indented!("Cycle: {:.1}%", state.fraction * 100.0);
    log_indented!("Illuminated: {:.0}%", state.illumination * 100.0);
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("moon - Moon phase and illumination");
    log_block_start!("Usage: filmlog moon [--at <datetime>]");
    log_block_start!("Options:");
    log_indented!("--at <datetime>        Instant in UTC, \"YYYY-MM-DD HH:MM:SS\"");
    log_end!();
}
