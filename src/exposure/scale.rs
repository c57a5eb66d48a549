//! Standard aperture and shutter scales, nearest-value selection and display.

use crate::constants::{CANDIDATE_COUNT, STANDARD_APERTURES, STANDARD_SHUTTER_SPEEDS};

/// Up to `count` values from `scale`, closest to `target` first.
///
/// Equal distances keep the scale's order (the sort is stable).
pub fn nearest_values(scale: &[f64], target: f64, count: usize) -> Vec<f64> {
    let mut ranked: Vec<(f64, f64)> = scale
        .iter()
        .map(|&value| (value, (value - target).abs()))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.into_iter().take(count).map(|(value, _)| value).collect()
}

/// The five standard apertures nearest the ideal f-number.
pub fn aperture_candidates(ideal_f_number: f64) -> Vec<f64> {
    nearest_values(&STANDARD_APERTURES, ideal_f_number, CANDIDATE_COUNT)
}

/// The five standard shutter speeds nearest `seconds`.
pub fn shutter_speed_candidates(seconds: f64) -> Vec<f64> {
    nearest_values(&STANDARD_SHUTTER_SPEEDS, seconds, CANDIDATE_COUNT)
}

/// `f/2.8`, `f/11`.
pub fn format_aperture(f_number: f64) -> String {
    format!("f/{}", (f_number * 10.0).round() / 10.0)
}

/// Shutter speed the way a camera dial shows it: `1/125`, `2s`, `4m`.
pub fn format_shutter_speed(seconds: f64) -> String {
    if seconds < 1.0 {
        return format!("1/{}", (1.0 / seconds).round());
    }
    if seconds >= 60.0 && seconds % 60.0 == 0.0 {
        return format!("{}m", seconds / 60.0);
    }
    if seconds.fract() == 0.0 {
        format!("{seconds}s")
    } else {
        format!("{seconds:.1}s")
    }
}

/// A measured duration in seconds as `0.06s`, `37.4s` or `3m 12s`.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{seconds:.3}s")
    } else if seconds < 60.0 {
        format!("{seconds:.1}s")
    } else {
        let total = seconds.round() as u64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let secs = total % 60;
        if hours > 0 {
            format!("{hours}h {minutes}m {secs}s")
        } else {
            format!("{minutes}m {secs}s")
        }
    }
}
