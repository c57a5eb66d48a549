//! Moon phase from elapsed time since a known new moon.
//!
//! The phase fraction runs from 0 (new) through 0.5 (full) back to 1 and is
//! a pure function of the instant; the observer's location plays no part.

use chrono::{DateTime, Utc};
use std::f64::consts::PI;
use std::fmt;

use crate::constants::{REFERENCE_NEW_MOON_UNIX, SECONDS_PER_DAY, SYNODIC_MONTH_DAYS};

/// One of the eight named lunar phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Name a phase fraction in [0, 1).
    pub fn from_fraction(fraction: f64) -> Self {
        match fraction {
            p if !(0.03..=0.97).contains(&p) => MoonPhase::New,
            p if p < 0.22 => MoonPhase::WaxingCrescent,
            p if p < 0.28 => MoonPhase::FirstQuarter,
            p if p < 0.47 => MoonPhase::WaxingGibbous,
            p if p < 0.53 => MoonPhase::Full,
            p if p < 0.72 => MoonPhase::WaningGibbous,
            p if p < 0.78 => MoonPhase::LastQuarter,
            _ => MoonPhase::WaningCrescent,
        }
    }

    /// The phase at an instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::from_fraction(phase_fraction(instant))
    }

    /// Identifier used in logs and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            MoonPhase::New => "new",
            MoonPhase::WaxingCrescent => "waxingCrescent",
            MoonPhase::FirstQuarter => "firstQuarter",
            MoonPhase::WaxingGibbous => "waxingGibbous",
            MoonPhase::Full => "full",
            MoonPhase::WaningGibbous => "waningGibbous",
            MoonPhase::LastQuarter => "lastQuarter",
            MoonPhase::WaningCrescent => "waningCrescent",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Fraction of the synodic month elapsed at `instant`, in [0, 1).
///
/// Instants before the reference new moon wrap around rather than going
/// negative.
pub fn phase_fraction(instant: DateTime<Utc>) -> f64 {
    let elapsed_seconds = (instant.timestamp() - REFERENCE_NEW_MOON_UNIX) as f64
        + f64::from(instant.timestamp_subsec_nanos()) / 1e9;
    let days = elapsed_seconds / SECONDS_PER_DAY;
    let fraction = days.rem_euclid(SYNODIC_MONTH_DAYS) / SYNODIC_MONTH_DAYS;

    // rem_euclid can land on exactly the modulus for tiny negative inputs
    if fraction >= 1.0 { 0.0 } else { fraction }
}

/// Illuminated fraction of the disc for a phase fraction.
pub fn illumination(fraction: f64) -> f64 {
    (1.0 - (2.0 * PI * fraction).cos()) / 2.0
}

/// Phase, fraction and illumination at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonState {
    pub timestamp: DateTime<Utc>,
    pub fraction: f64,
    pub phase: MoonPhase,
    pub illumination: f64,
}

pub fn moon_state_at(instant: DateTime<Utc>) -> MoonState {
    let fraction = phase_fraction(instant);
    MoonState {
        timestamp: instant,
        fraction,
        phase: MoonPhase::from_fraction(fraction),
        illumination: illumination(fraction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reference() -> DateTime<Utc> {
        DateTime::from_timestamp(REFERENCE_NEW_MOON_UNIX, 0).unwrap()
    }

    fn synodic_fraction(f: f64) -> Duration {
        Duration::milliseconds((SYNODIC_MONTH_DAYS * f * SECONDS_PER_DAY * 1000.0) as i64)
    }

    #[test]
    fn test_reference_instant_is_new() {
        assert_eq!(
            reference(),
            Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap()
        );
        assert!(phase_fraction(reference()) < 1e-9);
        assert_eq!(MoonPhase::at(reference()), MoonPhase::New);
    }

    #[test]
    fn test_half_synodic_month_is_full() {
        let full = reference() + synodic_fraction(0.5);
        assert!((phase_fraction(full) - 0.5).abs() < 1e-6);
        assert_eq!(MoonPhase::at(full), MoonPhase::Full);
        assert!((illumination(phase_fraction(full)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(MoonPhase::from_fraction(0.0), MoonPhase::New);
        assert_eq!(MoonPhase::from_fraction(0.029), MoonPhase::New);
        assert_eq!(MoonPhase::from_fraction(0.03), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_fraction(0.22), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_fraction(0.28), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::from_fraction(0.47), MoonPhase::Full);
        assert_eq!(MoonPhase::from_fraction(0.53), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::from_fraction(0.72), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_fraction(0.78), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::from_fraction(0.97), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::from_fraction(0.971), MoonPhase::New);
    }

    #[test]
    fn test_instants_before_reference_wrap() {
        let before = reference() - synodic_fraction(0.25);
        let fraction = phase_fraction(before);
        assert!((fraction - 0.75).abs() < 1e-6);
        assert_eq!(MoonPhase::at(before), MoonPhase::LastQuarter);
    }

    #[test]
    fn test_every_phase_over_a_month() {
        let mut seen = Vec::new();
        for day in 0..30 {
            let phase = MoonPhase::at(reference() + Duration::days(day));
            if seen.last() != Some(&phase) {
                seen.push(phase);
            }
        }
        assert_eq!(
            seen,
            vec![
                MoonPhase::New,
                MoonPhase::WaxingCrescent,
                MoonPhase::FirstQuarter,
                MoonPhase::WaxingGibbous,
                MoonPhase::Full,
                MoonPhase::WaningGibbous,
                MoonPhase::LastQuarter,
                MoonPhase::WaningCrescent,
                MoonPhase::New,
            ]
        );
    }

    #[test]
    fn test_known_full_moon() {
        // Full moon of 2024-04-23 23:49 UTC
        let instant = Utc.with_ymd_and_hms(2024, 4, 23, 23, 49, 0).unwrap();
        let state = moon_state_at(instant);
        assert_eq!(state.phase, MoonPhase::Full);
        assert!(state.illumination > 0.98);
    }

    #[test]
    fn test_illumination_quarters() {
        assert!(illumination(0.0).abs() < 1e-12);
        assert!((illumination(0.25) - 0.5).abs() < 1e-12);
        assert!((illumination(0.75) - 0.5).abs() < 1e-12);
    }
}
