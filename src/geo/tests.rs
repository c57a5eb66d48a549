#[cfg(test)]
mod solar_tests {
    use crate::constants::test_constants::*;
    use crate::geo::solar::*;
    use crate::geo::GeoPosition;
    use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

    fn position(lat: f64, lon: f64, instant: DateTime<Utc>) -> SunPosition {
        sun_position_at(&GeoPosition::new(lat, lon, instant).unwrap())
    }

    fn equinox_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 7, 0).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// At the equinox near 12:07 UTC on the prime meridian the sun is due
    /// south for northern latitudes, at an elevation of 90° minus latitude.
    #[test]
    fn test_equinox_noon_elevation_and_azimuth() {
        for lat in [40.0, 30.0] {
            let pos = position(lat, 0.0, equinox_noon());
            assert!(
                (pos.elevation_degrees - (90.0 - lat)).abs() < 1.0,
                "lat {lat}: elevation {}",
                pos.elevation_degrees
            );
            assert!(
                (pos.azimuth_degrees - 180.0).abs() < 3.0,
                "lat {lat}: azimuth {}",
                pos.azimuth_degrees
            );
        }

        let equator = position(0.0, 0.0, equinox_noon());
        assert!(equator.elevation_degrees > 89.0);
    }

    #[test]
    fn test_southern_hemisphere_noon_sun_is_north() {
        // Cape Town a little before local solar noon
        let instant = Utc.with_ymd_and_hms(2024, 3, 20, 10, 55, 0).unwrap();
        let pos = position(-33.9249, 18.4241, instant);

        assert!(pos.azimuth_degrees > 350.0 || pos.azimuth_degrees < 10.0);
        assert!((pos.elevation_degrees - 56.0).abs() < 1.0);
    }

    #[test]
    fn test_london_morning_position() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 21, 5, 0, 0).unwrap();
        let pos = position(TEST_LONDON_LAT, TEST_LONDON_LON, instant);

        assert!((pos.azimuth_degrees - 63.5).abs() < 1.0);
        assert!((pos.elevation_degrees - 9.1).abs() < 1.0);

        let midnight = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let pos = position(TEST_LONDON_LAT, TEST_LONDON_LON, midnight);
        assert!((pos.elevation_degrees + 15.1).abs() < 1.0);
        assert_eq!(pos.event, Some(SunEvent::AstronomicalTwilight));
    }

    #[test]
    fn test_position_ranges_at_poles() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 21, 18, 30, 0).unwrap();
        for (lat, lon) in [(90.0, 0.0), (-90.0, 180.0), (89.9, -180.0)] {
            let pos = position(lat, lon, instant);
            assert!((0.0..360.0).contains(&pos.azimuth_degrees));
            assert!((-90.0..=90.0).contains(&pos.elevation_degrees));
        }
    }

    #[test]
    fn test_classify_horizon_band() {
        assert_eq!(classify_event(0.5, time(6, 0)), Some(SunEvent::Sunrise));
        assert_eq!(classify_event(-0.8, time(5, 10)), Some(SunEvent::Sunrise));
        assert_eq!(classify_event(-0.5, time(19, 0)), Some(SunEvent::Sunset));
        assert_eq!(classify_event(0.2, time(12, 0)), Some(SunEvent::Sunset));
    }

    #[test]
    fn test_classify_solar_noon_window() {
        assert_eq!(classify_event(45.0, time(12, 20)), Some(SunEvent::SolarNoon));
        assert_eq!(classify_event(3.0, time(11, 30)), Some(SunEvent::SolarNoon));
        assert_eq!(classify_event(45.0, time(12, 31)), None);
        // Polar night: below the horizon at noon is not solar noon
        assert_eq!(
            classify_event(-8.0, time(12, 0)),
            Some(SunEvent::NauticalTwilight)
        );
    }

    #[test]
    fn test_classify_overlapping_bands_priority() {
        assert_eq!(classify_event(3.0, time(8, 0)), Some(SunEvent::GoldenHour));
        assert_eq!(classify_event(-2.0, time(20, 0)), Some(SunEvent::GoldenHour));
        assert_eq!(classify_event(-5.0, time(21, 0)), Some(SunEvent::BlueHour));
        // -4° sits outside both open golden and blue bands
        assert_eq!(classify_event(-4.0, time(21, 0)), Some(SunEvent::CivilTwilight));
        assert_eq!(classify_event(-8.0, time(22, 0)), Some(SunEvent::NauticalTwilight));
        assert_eq!(
            classify_event(-15.0, time(23, 0)),
            Some(SunEvent::AstronomicalTwilight)
        );
        assert_eq!(classify_event(-30.0, time(1, 0)), None);
        assert_eq!(classify_event(30.0, time(9, 0)), None);
    }

    #[test]
    fn test_daily_path_has_96_ascending_samples() {
        let location = GeoPosition::new(TEST_LONDON_LAT, TEST_LONDON_LON, equinox_noon()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let path = daily_sun_path(&location, date);

        assert_eq!(path.samples.len(), 96);
        assert_eq!(path.timezone, chrono_tz::Europe::London);
        assert!(
            path.samples
                .windows(2)
                .all(|w| w[0].timestamp < w[1].timestamp)
        );
        for pair in path.samples.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::minutes(15));
        }

        let first = path.samples[0].timestamp.with_timezone(&path.timezone);
        assert_eq!((first.hour(), first.minute()), (0, 0));
        assert_eq!(first.date_naive(), date);
    }

    #[test]
    fn test_sort_samples_restores_order_of_shuffled_workers() {
        let location = GeoPosition::new(TEST_LONDON_LAT, TEST_LONDON_LON, equinox_noon()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let expected = daily_sun_path(&location, date).samples;

        // 7 and 96 are coprime, so stepping by 7 visits every sample once
        let mut shuffled: Vec<SunPosition> =
            (0..expected.len()).map(|i| expected[(i * 7) % expected.len()]).collect();
        shuffled.reverse();
        assert_ne!(shuffled, expected);

        sort_samples(&mut shuffled);
        assert_eq!(shuffled, expected);
    }

    #[test]
    fn test_daily_path_peak_near_solar_noon() {
        let location = GeoPosition::new(TEST_LONDON_LAT, TEST_LONDON_LON, equinox_noon()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let path = daily_sun_path(&location, date);

        let highest = path.highest().unwrap();
        // 90 - 51.5 + 23.44
        assert!((highest.elevation_degrees - 61.9).abs() < 0.5);
        let local = highest.timestamp.with_timezone(&path.timezone);
        assert!(local.hour() == 12 || local.hour() == 13);

        assert!(path.with_event(SunEvent::SolarNoon).count() > 0);
        assert!(path.with_event(SunEvent::GoldenHour).count() > 0);
    }

    #[test]
    fn test_daily_path_across_dst_change() {
        // Clocks go forward in London on 2024-03-31; the day has 23 hours
        // but the path is still 96 samples from local midnight.
        let location = GeoPosition::new(TEST_LONDON_LAT, TEST_LONDON_LON, equinox_noon()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let path = daily_sun_path(&location, date);

        assert_eq!(path.samples.len(), 96);
        let first = path.samples[0].timestamp;
        assert_eq!(first, Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap());
    }
}

#[cfg(test)]
mod times_tests {
    use crate::constants::test_constants::*;
    use crate::geo::times::*;
    use crate::geo::GeoPosition;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
    use chrono_tz::Tz;

    fn times_on(lat: f64, lon: f64, y: i32, m: u32, d: u32) -> SunTimes {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let noon = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        sun_times_for_day(&GeoPosition::new(lat, lon, noon).unwrap(), date)
    }

    fn assert_near(actual: DateTime<Tz>, hour: u32, minute: u32, label: &str) {
        let actual_minutes = i64::from(actual.hour() * 60 + actual.minute());
        let expected = i64::from(hour * 60 + minute);
        assert!(
            (actual_minutes - expected).abs() <= TEST_RISE_SET_TOLERANCE_SECS / 60,
            "{label}: expected ~{hour:02}:{minute:02}, got {}",
            actual.format("%H:%M")
        );
    }

    #[test]
    fn test_london_summer_solstice() {
        let times = times_on(TEST_LONDON_LAT, TEST_LONDON_LON, 2024, 6, 21);
        let w = times.windows().expect("London has a sunrise in June");

        assert_eq!(times.origin, SunTimesOrigin::Local);
        assert_near(w.sunrise, 4, 43, "sunrise");
        assert_near(w.sunset, 21, 21, "sunset");
        assert_near(times.solar_noon, 13, 2, "solar noon");
        assert_near(w.civil_twilight_begin, 3, 55, "civil dawn");
        assert_near(w.civil_twilight_end, 22, 9, "civil dusk");

        let hours = times.day_length_seconds() as f64 / 3600.0;
        assert!((hours - 16.6).abs() < 0.2, "day length {hours}");
    }

    #[test]
    fn test_new_york_winter_solstice() {
        let times = times_on(TEST_NYC_LAT, TEST_NYC_LON, 2024, 12, 21);
        let w = times.windows().unwrap();

        assert_eq!(times.timezone, chrono_tz::America::New_York);
        assert_near(w.sunrise, 7, 17, "sunrise");
        assert_near(w.sunset, 16, 32, "sunset");
        assert_near(times.solar_noon, 11, 54, "solar noon");
    }

    #[test]
    fn test_singapore_equinox() {
        let times = times_on(TEST_SINGAPORE_LAT, TEST_SINGAPORE_LON, 2024, 3, 20);
        let w = times.windows().unwrap();

        assert_near(w.sunrise, 7, 8, "sunrise");
        assert_near(w.sunset, 19, 15, "sunset");
    }

    #[test]
    fn test_derived_windows() {
        let times = times_on(TEST_LONDON_LAT, TEST_LONDON_LON, 2024, 6, 21);
        let w = times.windows().unwrap();

        assert_eq!(w.golden_hour_start - w.sunrise, Duration::hours(1));
        assert_eq!(w.sunset - w.golden_hour_end, Duration::hours(1));
        assert_eq!(w.blue_hour_start - w.sunset, Duration::minutes(30));

        // Morning blue hour ends half an hour before the next day's sunrise
        let next = times_on(TEST_LONDON_LAT, TEST_LONDON_LON, 2024, 6, 22);
        let next_sunrise = next.sunrise().unwrap();
        assert_eq!(next_sunrise - w.blue_hour_end, Duration::minutes(30));
        assert!(w.blue_hour_end > w.blue_hour_start);

        assert_eq!(w.evening_blue_hour(), (w.sunset, w.blue_hour_start));
        assert_eq!(w.morning_blue_hour(), (w.blue_hour_end, next_sunrise));
    }

    #[test]
    fn test_event_ordering() {
        for (lat, lon) in [
            (TEST_LONDON_LAT, TEST_LONDON_LON),
            (TEST_NYC_LAT, TEST_NYC_LON),
            (TEST_SINGAPORE_LAT, TEST_SINGAPORE_LON),
            (-33.9249, 18.4241),
        ] {
            for month in [1, 4, 7, 10] {
                let times = times_on(lat, lon, 2024, month, 15);
                let w = times.windows().unwrap();
                assert!(w.civil_twilight_begin < w.sunrise);
                assert!(w.sunrise < w.golden_hour_start);
                assert!(w.sunrise < times.solar_noon && times.solar_noon < w.sunset);
                assert!(w.golden_hour_end < w.sunset);
                assert!(w.sunset < w.civil_twilight_end);
            }
        }
    }

    #[test]
    fn test_polar_day_and_night() {
        let summer = times_on(70.0, 19.0, 2024, 6, 21);
        assert_eq!(summer.daylight, Daylight::PolarDay);
        assert_eq!(summer.sunrise(), None);
        assert_eq!(summer.day_length_seconds(), 86_400);

        let winter = times_on(70.0, 19.0, 2024, 12, 21);
        assert_eq!(winter.daylight, Daylight::PolarNight);
        assert_eq!(winter.sunset(), None);
        assert_eq!(winter.day_length_seconds(), 0);

        // Seasons are reversed in the south
        let south = times_on(-70.0, 19.0, 2024, 6, 21);
        assert_eq!(south.daylight, Daylight::PolarNight);
    }

    #[test]
    fn test_solar_noon_defined_in_polar_day() {
        let summer = times_on(70.0, 19.0, 2024, 6, 21);
        // Transit near 12:00 - 19/15 h UTC, which is ~12:44 in Oslo summer time
        assert_near(summer.solar_noon, 12, 44, "polar day noon");
    }

    #[test]
    fn test_white_night_civil_twilight_fallback() {
        // The sun rises and sets in Tromsø in mid May but never reaches -6°
        let times = times_on(TEST_TROMSO_LAT, TEST_TROMSO_LON, 2024, 5, 10);
        let w = times.windows().unwrap();

        assert_eq!(times.timezone, chrono_tz::Europe::Oslo);
        assert_eq!(w.sunrise - w.civil_twilight_begin, Duration::minutes(30));
        assert_eq!(w.civil_twilight_end - w.sunset, Duration::minutes(30));
    }

    #[test]
    fn test_matches_reference_sunrise_crate() {
        use sunrise::{Coordinates, SolarDay, SolarEvent};

        for (lat, lon) in [
            (TEST_LONDON_LAT, TEST_LONDON_LON),
            (TEST_NYC_LAT, TEST_NYC_LON),
            (TEST_SINGAPORE_LAT, TEST_SINGAPORE_LON),
            (-33.8688, 151.2093),
        ] {
            for (m, d) in [(2, 1), (5, 15), (8, 30), (11, 11)] {
                let date = NaiveDate::from_ymd_opt(2024, m, d).unwrap();
                let ours = times_on(lat, lon, 2024, m, d);
                let w = ours.windows().unwrap();

                let coord = Coordinates::new(lat, lon).unwrap();
                let day = SolarDay::new(coord, date);
                let rise = day.event_time(SolarEvent::Sunrise);
                let set = day.event_time(SolarEvent::Sunset);

                let rise_diff = (w.sunrise.with_timezone(&Utc) - rise).num_seconds().abs();
                let set_diff = (w.sunset.with_timezone(&Utc) - set).num_seconds().abs();
                assert!(
                    rise_diff <= TEST_RISE_SET_TOLERANCE_SECS,
                    "{lat},{lon} {date}: sunrise off by {rise_diff}s"
                );
                assert!(
                    set_diff <= TEST_RISE_SET_TOLERANCE_SECS,
                    "{lat},{lon} {date}: sunset off by {set_diff}s"
                );
            }
        }
    }
}

#[cfg(test)]
mod position_tests {
    use crate::geo::{GeoPosition, local_midnight, resolve_local};
    use chrono::{NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
    use chrono_tz::Europe::London;

    #[test]
    fn test_coordinate_validation() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert!(GeoPosition::new(40.7128, -74.0060, now).is_ok());
        assert!(GeoPosition::new(90.0, 180.0, now).is_ok());
        assert!(GeoPosition::new(-90.0, -180.0, now).is_ok());

        assert!(GeoPosition::new(91.0, 0.0, now).is_err());
        assert!(GeoPosition::new(-90.5, 0.0, now).is_err());
        assert!(GeoPosition::new(0.0, 181.0, now).is_err());
        assert!(GeoPosition::new(0.0, -360.0, now).is_err());
        assert!(GeoPosition::new(f64::NAN, 0.0, now).is_err());
    }

    #[test]
    fn test_at_keeps_coordinates() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let pos = GeoPosition::new(12.5, -45.25, now).unwrap().at(later);

        assert_eq!(pos.latitude(), 12.5);
        assert_eq!(pos.longitude(), -45.25);
        assert_eq!(pos.timestamp(), later);
    }

    #[test]
    fn test_resolve_local_gap_and_overlap() {
        // 01:30 does not exist on 2024-03-31 in London
        let spring = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let t = resolve_local(London, spring, NaiveTime::from_hms_opt(1, 30, 0).unwrap());
        assert_eq!((t.hour(), t.minute()), (2, 30));

        // 01:30 happens twice on 2024-10-27; take the first (BST)
        let autumn = NaiveDate::from_ymd_opt(2024, 10, 27).unwrap();
        let t = resolve_local(London, autumn, NaiveTime::from_hms_opt(1, 30, 0).unwrap());
        assert_eq!(
            t.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 10, 27, 0, 30, 0).unwrap()
        );

        let midnight = local_midnight(London, spring);
        assert_eq!(midnight.with_timezone(&Utc).hour(), 0);
    }
}
