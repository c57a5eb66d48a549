//! Coordinate to timezone lookup.
//!
//! "Local" time for the solar engine (midnight, noon, the calendar day used
//! for rise/set) is the civil time of the zone the coordinates fall in, not
//! the zone of the machine running the calculation.

use chrono_tz::Tz;
use once_cell::sync::Lazy;
use tzf_rs::DefaultFinder;

// Building the finder decodes the bundled boundary data, so do it once
static FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// IANA timezone containing the coordinates.
///
/// Falls back to UTC for open ocean or names chrono-tz does not know.
pub fn determine_timezone_from_coordinates(latitude: f64, longitude: f64) -> Tz {
    let name = FINDER.get_tz_name(longitude, latitude);
    name.parse::<Tz>().unwrap_or(Tz::UTC)
}
