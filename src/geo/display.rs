//! Log rendering of sun positions, sun times and daily paths.

use chrono::{DateTime, Offset};
use chrono_tz::Tz;

use super::solar::{DailySunPath, SunPosition};
use super::times::{Daylight, SunTimes, SunTimesOrigin};

/// `HH:MM` in the zone the time carries.
pub fn format_time(time: DateTime<Tz>) -> String {
    time.format("%H:%M").to_string()
}

/// `+01:00` style offset of a zone at an instant.
fn format_offset(time: DateTime<Tz>) -> String {
    let secs = time.offset().fix().local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    format!("{sign}{:02}:{:02}", secs / 3600, (secs % 3600) / 60)
}

fn format_day_length(seconds: i64) -> String {
    format!("{}h {:02}m", seconds / 3600, (seconds % 3600) / 60)
}

/// Log the sun's position at one instant.
pub fn log_sun_position(position: &SunPosition, tz: Tz) {
    let local = position.timestamp.with_timezone(&tz);
    log_block_start!(
        "Sun at {} ({} {})",
        local.format("%Y-%m-%d %H:%M"),
        tz,
        format_offset(local)
    );
    log_indented!("Elevation: {:.1}°", position.elevation_degrees);
    log_indented!("  Azimuth: {:.1}°", position.azimuth_degrees);
    if let Some(event) = position.event {
        log_indented!("    Light: {event}");
    }
}

/// Log sunrise/sunset and the derived windows for one day.
pub fn log_sun_times(times: &SunTimes) {
    let source = match times.origin {
        SunTimesOrigin::Local => "local calculation",
        SunTimesOrigin::Remote => "remote service",
    };
    log_block_start!("Sun times for {} ({})", times.date, source);
    log_indented!("      Solar noon: {}", format_time(times.solar_noon));

    match &times.daylight {
        Daylight::RiseAndSet(w) => {
            log_indented!("  Civil twilight: {}", format_time(w.civil_twilight_begin));
            log_indented!("         Sunrise: {}", format_time(w.sunrise));
            log_indented!(
                "     Golden hour: {} - {}",
                format_time(w.sunrise),
                format_time(w.golden_hour_start)
            );
            log_indented!(
                "     Golden hour: {} - {}",
                format_time(w.golden_hour_end),
                format_time(w.sunset)
            );
            log_indented!("          Sunset: {}", format_time(w.sunset));
            let (evening_start, evening_end) = w.evening_blue_hour();
            log_indented!(
                "       Blue hour: {} - {}",
                format_time(evening_start),
                format_time(evening_end)
            );
            let (morning_start, morning_end) = w.morning_blue_hour();
            log_indented!(
                "  Next blue hour: {} - {} ({})",
                format_time(morning_start),
                format_time(morning_end),
                morning_end.date_naive()
            );
            log_indented!("       Civil end: {}", format_time(w.civil_twilight_end));
        }
        Daylight::PolarDay => {
            log_indented!("The sun does not set on this day (polar day)");
        }
        Daylight::PolarNight => {
            log_indented!("The sun does not rise on this day (polar night)");
        }
    }

    log_indented!("      Day length: {}", format_day_length(times.day_length_seconds()));
}

/// Log an hourly summary of a daily sun path.
pub fn log_sun_path(path: &DailySunPath) {
    log_block_start!("Sun path for {} ({})", path.date, path.timezone);
    for sample in path.samples.iter().step_by(4) {
        let local = sample.timestamp.with_timezone(&path.timezone);
        let event = sample.event.map(|e| e.to_string()).unwrap_or_default();
        log_indented!(
            "{}  {:>6.1}°  {:>5.1}°  {}",
            local.format("%H:%M"),
            sample.elevation_degrees,
            sample.azimuth_degrees,
            event
        );
    }
    if let Some(highest) = path.highest() {
        log_decorated!(
            "Highest sample: {:.1}° at {}",
            highest.elevation_degrees,
            format_time(highest.timestamp.with_timezone(&path.timezone))
        );
    }
}
