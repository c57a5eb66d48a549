//! Exposure and reciprocity calculations.
//!
//! Given a metered exposure value and (optionally) the film in the camera,
//! [`compute_exposure`] works out the effective ISO, the metered exposure
//! time, the reciprocity-corrected time and the nearest standard aperture and
//! shutter settings. [`reciprocity_warning`] classifies how much a given
//! exposure time would need to be extended.
//!
//! Everything here is a pure function of its arguments.
//!
//! ## Module Structure
//!
//! - [`film`]: Film characteristics, the reciprocity power law and the
//!   built-in film-stock catalog
//! - [`scale`]: Standard aperture/shutter scales and display formatting

pub mod film;
pub mod scale;

use anyhow::{Result, ensure};
use std::fmt;

use crate::constants::{RECIPROCITY_HIGH_SECONDS, RECIPROCITY_WARNING_SECONDS};

pub use film::{FilmCharacteristics, FilmStock, builtin_catalog, find_stock};
pub use scale::{format_aperture, format_duration, format_shutter_speed};

/// Outcome of one exposure calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureResult {
    pub metered_ev: f64,
    pub adjusted_ev: f64,
    pub base_exposure_time_seconds: f64,
    /// Never shorter than `base_exposure_time_seconds`.
    pub corrected_exposure_time_seconds: f64,
    pub effective_iso: f64,
    /// Closest first.
    pub aperture_candidates: Vec<f64>,
    /// Closest first.
    pub shutter_speed_candidates: Vec<f64>,
    pub reciprocity_compensation_seconds: f64,
}

impl ExposureResult {
    /// Whether the film needed any reciprocity compensation.
    pub fn has_reciprocity_compensation(&self) -> bool {
        self.reciprocity_compensation_seconds > 0.0
    }
}

/// Compute the exposure for a metered EV.
///
/// `base_iso` is the ISO the meter reading refers to. With a film, the
/// effective ISO is the film's rating adjusted by its own push/pull; without
/// one it is `base_iso`. `push_pull_stops` is applied to the EV on top of the
/// ISO adjustment.
///
/// # Errors
///
/// Fails when `base_iso` or the film's ISO is not a positive finite number,
/// when `metered_ev` is not finite, or when the EV is so extreme that the
/// exposure time is not representable.
pub fn compute_exposure(
    metered_ev: f64,
    film: Option<&FilmCharacteristics>,
    base_iso: f64,
    push_pull_stops: f64,
) -> Result<ExposureResult> {
    ensure!(
        base_iso.is_finite() && base_iso > 0.0,
        "base ISO must be a positive number (got {base_iso})"
    );
    ensure!(metered_ev.is_finite(), "metered EV must be finite");
    if let Some(film) = film {
        ensure!(
            film.iso_rating.is_finite() && film.iso_rating > 0.0,
            "film ISO must be a positive number (got {})",
            film.iso_rating
        );
    }

    let effective_iso = film.map_or(base_iso, FilmCharacteristics::effective_iso);
    let iso_adjustment = (effective_iso / base_iso).log2();
    let adjusted_ev = metered_ev - iso_adjustment - push_pull_stops;

    let base_time = (-adjusted_ev).exp2();
    ensure!(
        base_time.is_finite() && base_time > 0.0,
        "EV {adjusted_ev:.1} is outside the representable exposure range"
    );

    let corrected_time = film.map_or(base_time, |film| film.corrected_time(base_time));
    ensure!(
        corrected_time.is_finite(),
        "EV {adjusted_ev:.1} needs a reciprocity-corrected exposure too long to represent"
    );
    let ideal_aperture = (adjusted_ev.exp2() / corrected_time).sqrt();

    Ok(ExposureResult {
        metered_ev,
        adjusted_ev,
        base_exposure_time_seconds: base_time,
        corrected_exposure_time_seconds: corrected_time,
        effective_iso,
        aperture_candidates: scale::aperture_candidates(ideal_aperture),
        shutter_speed_candidates: scale::shutter_speed_candidates(corrected_time),
        reciprocity_compensation_seconds: corrected_time - base_time,
    })
}

/// How strongly an exposure is affected by reciprocity failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    Medium,
    High,
}

impl WarningSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningSeverity::Medium => "medium",
            WarningSeverity::High => "high",
        }
    }
}

/// Reciprocity advice for one exposure time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReciprocityWarning {
    pub severity: WarningSeverity,
    pub exposure_time_seconds: f64,
    pub corrected_time_seconds: f64,
    pub compensation_seconds: f64,
}

impl fmt::Display for ReciprocityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reciprocity failure ({}): expose {} instead of {} (+{})",
            self.severity.as_str(),
            format_duration(self.corrected_time_seconds),
            format_duration(self.exposure_time_seconds),
            format_duration(self.compensation_seconds)
        )
    }
}

/// Classify the reciprocity compensation needed for `exposure_time_seconds`.
///
/// Returns `None` without a film or when the extra time is 0.5 s or less.
/// Severity is high above 2 s of compensation, medium otherwise.
pub fn reciprocity_warning(
    exposure_time_seconds: f64,
    film: Option<&FilmCharacteristics>,
) -> Option<ReciprocityWarning> {
    let film = film?;
    let corrected = film.corrected_time(exposure_time_seconds);
    let compensation = corrected - exposure_time_seconds;

    if compensation <= RECIPROCITY_WARNING_SECONDS {
        return None;
    }

    let severity = if compensation > RECIPROCITY_HIGH_SECONDS {
        WarningSeverity::High
    } else {
        WarningSeverity::Medium
    };

    Some(ReciprocityWarning {
        severity,
        exposure_time_seconds,
        corrected_time_seconds: corrected,
        compensation_seconds: compensation,
    })
}
