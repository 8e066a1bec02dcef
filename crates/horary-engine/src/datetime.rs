//! Date/time parsing and timezone resolution: an ordered format list,
//! plus DST-ambiguous/non-existent local time resolution.

use chrono::{Datelike, Duration, LocalResult, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;
use horary_core::HoraryError;

/// Parsers tried in this exact order. The date and time strings are
/// joined with a space before matching, so each format here embeds `%H:%M`.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%d-%m-%Y %H:%M",
    "%Y/%m/%d %H:%M",
];

/// Parse a `date` + `time` pair against an ordered format list. The first
/// format that parses successfully wins; this means genuinely ambiguous
/// inputs like `03/04/2024` are read as day/month first (European
/// convention) rather than month/day.
pub fn parse_local_datetime(date: &str, time: &str) -> Result<NaiveDateTime, HoraryError> {
    let combined = format!("{} {}", date.trim(), time.trim());
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&combined, format) {
            return Ok(parsed);
        }
    }
    Err(HoraryError::input(format!(
        "could not parse date '{date}' and time '{time}' against any recognized format"
    )))
}

/// Resolve a naive local datetime against an IANA zone, handling the two
/// DST edge cases: ambiguous (fall-back) times resolve to the
/// standard-time occurrence; non-existent (spring-forward) times advance by
/// one hour into the zone's next valid instant.
pub fn resolve_in_zone(naive: NaiveDateTime, tz: Tz) -> chrono::DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        // The later of the two candidates carries the more-negative (or
        // less-advanced) UTC offset, i.e. standard time.
        LocalResult::Ambiguous(earliest, latest) => {
            if earliest.offset().fix() <= latest.offset().fix() {
                earliest
            } else {
                latest
            }
        }
        LocalResult::None => {
            let advanced = naive + Duration::hours(1);
            match tz.from_local_datetime(&advanced) {
                LocalResult::Single(dt) => dt,
                LocalResult::Ambiguous(earliest, _) => earliest,
                LocalResult::None => {
                    // Pathological double-gap; fall back to UTC-equivalent
                    // construction rather than panicking.
                    tz.from_utc_datetime(&advanced)
                }
            }
        }
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, HoraryError> {
    name.parse::<Tz>()
        .map_err(|_| HoraryError::input(format!("unrecognized timezone identifier '{name}'")))
}

/// Julian Day Number (with fractional day) for a UTC instant, per the
/// standard astronomical algorithm (Meeus, ch. 7).
pub fn julian_day(utc: chrono::DateTime<chrono::Utc>) -> f64 {
    let date = utc.date_naive();
    let (mut year, mut month) = (date.year(), date.month() as i32);
    let day = date.day() as f64;
    if month <= 2 {
        year -= 1;
        month += 12;
    }
    let a = (year as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    let day_fraction = {
        let time = utc.time();
        let seconds = time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1e9;
        seconds / 86400.0
    };
    (365.25 * (year as f64 + 4716.0)).floor() + (30.6001 * (month as f64 + 1.0)).floor() + day
        + b
        - 1524.5
        + day_fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn iso_format_parses() {
        let dt = parse_local_datetime("2004-02-03", "22:00").unwrap();
        assert_eq!(dt.to_string(), "2004-02-03 22:00:00");
    }

    #[test]
    fn day_month_year_slash_format_parses_before_us_format() {
        // 03/04/2024 is ambiguous between DD/MM and MM/DD; DD/MM is tried first.
        let dt = parse_local_datetime("03/04/2024", "10:00").unwrap();
        assert_eq!(dt.month(), 4);
        assert_eq!(dt.day(), 3);
    }

    #[test]
    fn unrecognized_format_is_an_input_error() {
        assert!(parse_local_datetime("not a date", "whenever").is_err());
    }

    #[test]
    fn julian_day_matches_known_epoch() {
        // 2000-01-01 12:00 UTC is JD 2451545.0 exactly.
        let utc = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        assert!((julian_day(utc) - 2_451_545.0).abs() < 1e-6);
    }
}
