//! Sunrise, sunset and the photographic windows around them for one day.
//!
//! Rise and set are solved with the Almanac for Computers (1990) method: for
//! the day of year and longitude, iterate the sun's right ascension and
//! declination until the hour angle at the requested zenith settles. When
//! that hour angle has no solution the sun stays above (polar day) or below
//! (polar night) the horizon all day, and [`Daylight`] says so instead of
//! producing a made-up timestamp.
//!
//! Derived windows, as offsets from sunrise and sunset:
//!
//! - golden hour: the hour after sunrise and the hour before sunset
//! - blue hour: the half hour after sunset and the half hour before the
//!   next sunrise
//! - civil twilight: solved at -6° elevation, or ±30 minutes around
//!   sunrise/sunset when the sun never gets that low (white nights)

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use super::GeoPosition;
use crate::constants::{
    GOLDEN_HOUR_OFFSET_MINUTES, SECONDS_PER_DAY, TWILIGHT_OFFSET_MINUTES, ZENITH_CIVIL,
    ZENITH_OFFICIAL,
};

/// Refinement passes for the rise/set solve.
const SOLVE_ITERATIONS: usize = 3;

/// Where a set of sun times came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunTimesOrigin {
    /// Computed by the built-in algorithm.
    Local,
    /// Parsed from a remote sunrise/sunset service.
    Remote,
}

/// Rise/set instants and the windows derived from them.
///
/// The golden and blue hour fields are the inner boundaries of each
/// window: the morning golden hour runs from `sunrise` to
/// `golden_hour_start` and the evening one from `golden_hour_end` to
/// `sunset`; the evening blue hour runs from `sunset` to `blue_hour_start`
/// and the morning one from `blue_hour_end` to the next sunrise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaylightWindows {
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
    pub golden_hour_start: DateTime<Tz>,
    pub golden_hour_end: DateTime<Tz>,
    pub blue_hour_start: DateTime<Tz>,
    pub blue_hour_end: DateTime<Tz>,
    pub civil_twilight_begin: DateTime<Tz>,
    pub civil_twilight_end: DateTime<Tz>,
}

impl DaylightWindows {
    /// Build the windows from rise/set and optional twilight instants.
    ///
    /// `next_sunrise` defaults to the same-day sunrise one day later.
    pub(crate) fn from_rise_set(
        sunrise: DateTime<Tz>,
        sunset: DateTime<Tz>,
        next_sunrise: Option<DateTime<Tz>>,
        civil_twilight: Option<(DateTime<Tz>, DateTime<Tz>)>,
    ) -> Self {
        let golden = Duration::minutes(GOLDEN_HOUR_OFFSET_MINUTES);
        let twilight = Duration::minutes(TWILIGHT_OFFSET_MINUTES);
        let next_sunrise = next_sunrise.unwrap_or(sunrise + Duration::days(1));
        let (civil_twilight_begin, civil_twilight_end) =
            civil_twilight.unwrap_or((sunrise - twilight, sunset + twilight));

        Self {
            sunrise,
            sunset,
            golden_hour_start: sunrise + golden,
            golden_hour_end: sunset - golden,
            blue_hour_start: sunset + twilight,
            blue_hour_end: next_sunrise - twilight,
            civil_twilight_begin,
            civil_twilight_end,
        }
    }

    /// The evening blue hour, from sunset until `blue_hour_start`.
    pub fn evening_blue_hour(&self) -> (DateTime<Tz>, DateTime<Tz>) {
        (self.sunset, self.blue_hour_start)
    }

    /// The morning blue hour, from `blue_hour_end` until the next sunrise.
    pub fn morning_blue_hour(&self) -> (DateTime<Tz>, DateTime<Tz>) {
        (
            self.blue_hour_end,
            self.blue_hour_end + Duration::minutes(TWILIGHT_OFFSET_MINUTES),
        )
    }
}

/// Whether the sun crosses the horizon on a given day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Daylight {
    RiseAndSet(DaylightWindows),
    /// The sun stays above the horizon all day.
    PolarDay,
    /// The sun stays below the horizon all day.
    PolarNight,
}

/// Sun times for one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunTimes {
    pub date: NaiveDate,
    pub timezone: Tz,
    /// Upper transit; defined even during polar day or night.
    pub solar_noon: DateTime<Tz>,
    pub daylight: Daylight,
    pub origin: SunTimesOrigin,
}

impl SunTimes {
    pub fn windows(&self) -> Option<&DaylightWindows> {
        match &self.daylight {
            Daylight::RiseAndSet(windows) => Some(windows),
            Daylight::PolarDay | Daylight::PolarNight => None,
        }
    }

    pub fn sunrise(&self) -> Option<DateTime<Tz>> {
        self.windows().map(|w| w.sunrise)
    }

    pub fn sunset(&self) -> Option<DateTime<Tz>> {
        self.windows().map(|w| w.sunset)
    }

    /// Time between sunrise and sunset; a full day during polar day.
    pub fn day_length(&self) -> Duration {
        match &self.daylight {
            Daylight::RiseAndSet(w) => w.sunset - w.sunrise,
            Daylight::PolarDay => Duration::seconds(SECONDS_PER_DAY as i64),
            Daylight::PolarNight => Duration::zero(),
        }
    }

    pub fn day_length_seconds(&self) -> i64 {
        self.day_length().num_seconds()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Crossing {
    Rising,
    Setting,
    Transit,
}

/// Result of solving for one horizon crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Solution {
    /// Hours after UT midnight of the requested date.
    At(f64),
    /// The sun never gets down to the zenith threshold.
    AlwaysAbove,
    /// The sun never gets up to the zenith threshold.
    AlwaysBelow,
}

/// Solve one crossing for day-of-year `day_of_year`.
fn solve_crossing(
    day_of_year: u32,
    latitude: f64,
    longitude: f64,
    zenith: f64,
    crossing: Crossing,
) -> Solution {
    let lng_hour = longitude / 15.0;
    let lat = latitude.to_radians();
    let mut local_hour = match crossing {
        Crossing::Rising => 6.0,
        Crossing::Transit => 12.0,
        Crossing::Setting => 18.0,
    };

    for _ in 0..SOLVE_ITERATIONS {
        let t = f64::from(day_of_year) + (local_hour - lng_hour) / 24.0;

        let mean_anomaly = 0.9856 * t - 3.289;
        let true_longitude = (mean_anomaly
            + 1.916 * mean_anomaly.to_radians().sin()
            + 0.020 * (2.0 * mean_anomaly).to_radians().sin()
            + 282.634)
            .rem_euclid(360.0);

        // Right ascension in the same quadrant as the true longitude
        let mut right_ascension = (0.91764 * true_longitude.to_radians().tan())
            .atan()
            .to_degrees()
            .rem_euclid(360.0);
        let longitude_quadrant = (true_longitude / 90.0).floor() * 90.0;
        let ascension_quadrant = (right_ascension / 90.0).floor() * 90.0;
        right_ascension += longitude_quadrant - ascension_quadrant;
        let right_ascension_hours = right_ascension / 15.0;

        let sin_declination = 0.39782 * true_longitude.to_radians().sin();
        let cos_declination = sin_declination.asin().cos();

        let hour_angle = match crossing {
            Crossing::Transit => 0.0,
            Crossing::Rising | Crossing::Setting => {
                let cos_h = (zenith.to_radians().cos() - sin_declination * lat.sin())
                    / (cos_declination * lat.cos());
                if cos_h > 1.0 {
                    return Solution::AlwaysBelow;
                }
                if cos_h < -1.0 {
                    return Solution::AlwaysAbove;
                }
                let h = cos_h.acos().to_degrees();
                if crossing == Crossing::Rising {
                    (360.0 - h) / 15.0
                } else {
                    h / 15.0
                }
            }
        };

        local_hour =
            (hour_angle + right_ascension_hours - 0.06571 * t - 6.622).rem_euclid(24.0);
    }

    Solution::At(local_hour - lng_hour)
}

fn instant_on(date: NaiveDate, ut_hours: f64, tz: Tz) -> DateTime<Tz> {
    let midnight = Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));
    let offset = Duration::milliseconds((ut_hours * 3_600_000.0).round() as i64);
    (midnight + offset).with_timezone(&tz)
}

fn rise_and_set(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    zenith: f64,
    tz: Tz,
) -> Result<(DateTime<Tz>, DateTime<Tz>), Daylight> {
    let day = date.ordinal();
    let rise = solve_crossing(day, latitude, longitude, zenith, Crossing::Rising);
    let set = solve_crossing(day, latitude, longitude, zenith, Crossing::Setting);

    match (rise, set) {
        (Solution::At(rise), Solution::At(set)) => {
            Ok((instant_on(date, rise, tz), instant_on(date, set, tz)))
        }
        (Solution::AlwaysBelow, _) | (_, Solution::AlwaysBelow) => Err(Daylight::PolarNight),
        _ => Err(Daylight::PolarDay),
    }
}

/// Sun times for `date` at the location's coordinates, in `tz`.
pub fn sun_times_in_zone(location: &GeoPosition, date: NaiveDate, tz: Tz) -> SunTimes {
    let (lat, lon) = (location.latitude(), location.longitude());

    let solar_noon = match solve_crossing(date.ordinal(), lat, lon, ZENITH_OFFICIAL, Crossing::Transit)
    {
        Solution::At(hours) => instant_on(date, hours, tz),
        Solution::AlwaysAbove | Solution::AlwaysBelow => {
            instant_on(date, 12.0 - lon / 15.0, tz)
        }
    };

    let daylight = match rise_and_set(date, lat, lon, ZENITH_OFFICIAL, tz) {
        Ok((sunrise, sunset)) => {
            let next_sunrise = date
                .succ_opt()
                .and_then(|next| rise_and_set(next, lat, lon, ZENITH_OFFICIAL, tz).ok())
                .map(|(sunrise, _)| sunrise);
            let civil_twilight = rise_and_set(date, lat, lon, ZENITH_CIVIL, tz).ok();

            Daylight::RiseAndSet(DaylightWindows::from_rise_set(
                sunrise,
                sunset,
                next_sunrise,
                civil_twilight,
            ))
        }
        Err(polar) => {
            log_debug!("No sunrise/sunset at {lat:.4}°, {lon:.4}° on {date}");
            polar
        }
    };

    SunTimes {
        date,
        timezone: tz,
        solar_noon,
        daylight,
        origin: SunTimesOrigin::Local,
    }
}

/// Sun times for the local calendar day `date` at the location's coordinates.
pub fn sun_times_for_day(location: &GeoPosition, date: NaiveDate) -> SunTimes {
    sun_times_in_zone(location, date, location.timezone())
}
