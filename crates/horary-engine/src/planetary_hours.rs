//! Planetary day and hour rulers for `general_info`, computed from the
//! classical Chaldean order. Real planetary hours are unequal, bounded by
//! sunrise and sunset; without a sunrise/sunset oracle in the collaborator
//! contract names only ephemeris/geocoder/timezone collaborators, this divides the
//! local day into 24 equal hours from local midnight instead — a
//! documented simplification (DESIGN.md), not a claim of classical
//! precision.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use horary_core::Planet;

/// Saturn, Jupiter, Mars, Sun, Venus, Mercury, Moon — the descending
/// Chaldean planetary order, repeating every seven hours.
const CHALDEAN_ORDER: [Planet; 7] = [
    Planet::Saturn,
    Planet::Jupiter,
    Planet::Mars,
    Planet::Sun,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
];

/// The ruler of the day of the week (Sunday = Sun, Monday = Moon, ...).
pub fn planetary_day(weekday: Weekday) -> Planet {
    match weekday {
        Weekday::Sun => Planet::Sun,
        Weekday::Mon => Planet::Moon,
        Weekday::Tue => Planet::Mars,
        Weekday::Wed => Planet::Mercury,
        Weekday::Thu => Planet::Jupiter,
        Weekday::Fri => Planet::Venus,
        Weekday::Sat => Planet::Saturn,
    }
}

fn chaldean_index(planet: Planet) -> usize {
    CHALDEAN_ORDER
        .iter()
        .position(|p| *p == planet)
        .expect("every planet appears in the Chaldean order")
}

/// The ruler of the current hour, per the simplified equal-hour scheme
/// documented above.
pub fn planetary_hour(local_datetime: NaiveDateTime) -> Planet {
    let day_ruler = planetary_day(local_datetime.weekday());
    let start = chaldean_index(day_ruler);
    let hour = local_datetime.hour() as usize;
    CHALDEAN_ORDER[(start + hour) % 7]
}
