//! `filmlog exposure`: aperture/shutter suggestions for a metered EV.

use anyhow::{Result, bail};

use crate::constants::MAXIMUM_PUSH_PULL_STOPS;
use crate::exposure::{
    ExposureResult, FilmStock, compute_exposure, format_aperture, format_duration,
    format_shutter_speed, reciprocity_warning,
};

pub fn handle_exposure_command(
    ev: f64,
    film_name: Option<&str>,
    base_iso: Option<f64>,
    push_pull_stops: Option<f64>,
) -> Result<()> {
    let config = super::load_config()?;
    let mut stock = config.resolve_film(film_name)?;

    if let Some(stops) = push_pull_stops {
        if stops.abs() > MAXIMUM_PUSH_PULL_STOPS {
            bail!(
                "push/pull must be between -{MAXIMUM_PUSH_PULL_STOPS} and {MAXIMUM_PUSH_PULL_STOPS} stops (got {stops})"
            );
        }
        stock.characteristics = stock.characteristics.with_push_pull(stops);
    }

    let base_iso = base_iso.unwrap_or(config.base_iso());
    let result = compute_exposure(ev, Some(&stock.characteristics), base_iso, 0.0)?;

    log_version!();
    log_exposure(&stock, base_iso, &result);

    if let Some(warning) =
        reciprocity_warning(result.base_exposure_time_seconds, Some(&stock.characteristics))
    {
        log_pipe!();
        log_warning!("{warning}");
    }

    log_end!();
    Ok(())
}

fn log_exposure(stock: &FilmStock, base_iso: f64, result: &ExposureResult) {
    let film = &stock.characteristics;

    log_block_start!("{} at EV {:.1}", stock.name, result.metered_ev);
    if film.push_pull_stops != 0.0 {
        log_indented!(
            "Effective ISO: {:.0} ({:+} stops from {:.0})",
            result.effective_iso,
            film.push_pull_stops,
            film.iso_rating
        );
    } else {
        log_indented!("Effective ISO: {:.0}", result.effective_iso);
    }
    log_indented!("Meter ISO: {base_iso:.0}");
    log_indented!("Adjusted EV: {:.1}", result.adjusted_ev);
    log_indented!(
        "Metered time: {}",
        format_duration(result.base_exposure_time_seconds)
    );
    if result.has_reciprocity_compensation() {
        log_indented!(
            "Corrected time: {} (+{})",
            format_duration(result.corrected_exposure_time_seconds),
            format_duration(result.reciprocity_compensation_seconds)
        );
    }

    let apertures: Vec<String> = result
        .aperture_candidates
        .iter()
        .map(|&f| format_aperture(f))
        .collect();
    let shutters: Vec<String> = result
        .shutter_speed_candidates
        .iter()
        .map(|&t| format_shutter_speed(t))
        .collect();

    log_block_start!("Suggestions (closest first):");
    log_indented!("Apertures: {}", apertures.join(", "));
    log_indented!("Shutter speeds: {}", shutters.join(", "));
}

pub fn display_help() {
    log_version!();
    log_block_start!("exposure - Exposure settings for a metered EV");
    log_block_start!("Usage: filmlog exposure <EV> [OPTIONS]");
    log_block_start!("Arguments:");
    log_indented!("EV                     Metered exposure value (may be negative)");
    log_block_start!("Options:");
    log_indented!("-f, --film <name>      Film stock (default: default_film from config)");
    log_indented!("-i, --iso <iso>        ISO the meter is calibrated to (default: base_iso)");
    log_indented!("-p, --push <stops>     Push (+) or pull (-) processing, up to 4 stops");
    log_block_start!("Examples:");
    log_indented!("filmlog exposure 12");
    log_indented!("filmlog exposure 3 --film \"Tri-X 400\" --push 1");
    log_indented!("filmlog exposure -2 --film \"Portra 400\"");
    log_end!();
}
