//! Moon Story: the Moon's last separating and next applying aspect,
//! void-of-course state, phase, and mansion.

use std::collections::HashMap;

use horary_config::{Configuration, VoidMethod};
use horary_core::geometry::normalize_degrees;
use horary_core::{LunarAspect, Planet, PlanetPosition};

use crate::pipeline::aspects::aspect_between;

/// The 28 classical lunar mansions (manazil al-qamar), ~12.857° each,
/// consulted for `general_info.moon_mansion`.
const LUNAR_MANSIONS: [&str; 28] = [
    "Al Sharatain",
    "Al Butain",
    "Al Thurayya",
    "Al Dabaran",
    "Al Haq'ah",
    "Al Han'ah",
    "Al Dhira",
    "Al Nathrah",
    "Al Tarf",
    "Al Jabhah",
    "Al Zubrah",
    "Al Sarfah",
    "Al Awwa",
    "Al Simak",
    "Al Ghafr",
    "Al Zubana",
    "Al Iklil",
    "Al Qalb",
    "Al Shaulah",
    "Al Na'am",
    "Al Baldah",
    "Sa'd al Dhabih",
    "Sa'd Bula",
    "Sa'd al Su'ud",
    "Sa'd al Akhbiyah",
    "Al Fargh al Mukdim",
    "Al Fargh al Thani",
    "Batn al Hut",
];

/// Candidate aspects between the Moon and every other body, reusing the
/// Aspect Engine's moiety/applying logic rather than re-deriving it.
fn moon_candidates(
    positions: &HashMap<Planet, PlanetPosition>,
    config: &Configuration,
) -> Vec<horary_core::AspectInfo> {
    let moon = &positions[&Planet::Moon];
    horary_core::ALL_PLANETS
        .into_iter()
        .filter(|p| *p != Planet::Moon)
        .filter_map(|p| aspect_between(moon, &positions[&p], config))
        .collect()
}

fn eta_human(days: f64, config: &Configuration) -> String {
    let t = &config.timing;
    if days <= t.within_hours_max_days {
        "within hours".to_string()
    } else if days <= t.within_day_max_days {
        "within a day".to_string()
    } else if days <= t.within_days_max_days {
        format!("within {} days", days.ceil() as i64)
    } else if days <= t.within_weeks_max_days {
        format!("within {} weeks", (days / 7.0).ceil() as i64)
    } else if days <= t.within_months_max_days {
        format!("within {} months", (days / 30.0).ceil() as i64)
    } else {
        "more than a year".to_string()
    }
}

fn to_lunar_aspect(info: &horary_core::AspectInfo, config: &Configuration) -> LunarAspect {
    let planet = info
        .other(Planet::Moon)
        .expect("moon candidates always involve the Moon");
    let eta_days = info.days_to_exact.unwrap_or(0.0);
    LunarAspect {
        planet,
        aspect: info.aspect,
        orb: info.orb,
        degrees_difference: info.orb,
        eta_days,
        eta_human: if info.applying {
            eta_human(eta_days, config)
        } else {
            "recently separated".to_string()
        },
        applying: info.applying,
    }
}

/// The Moon's most recent separating and next applying aspect.
pub fn moon_story(
    positions: &HashMap<Planet, PlanetPosition>,
    config: &Configuration,
) -> (Option<LunarAspect>, Option<LunarAspect>) {
    let candidates = moon_candidates(positions, config);

    let next_applying = candidates
        .iter()
        .filter(|c| c.applying)
        .min_by(|a, b| a.degrees_to_exact.partial_cmp(&b.degrees_to_exact).unwrap())
        .map(|c| to_lunar_aspect(c, config));

    let last_separating = candidates
        .iter()
        .filter(|c| !c.applying)
        .min_by(|a, b| a.orb.partial_cmp(&b.orb).unwrap())
        .map(|c| to_lunar_aspect(c, config));

    (last_separating, next_applying)
}

fn sign_name_lowercase(sign: horary_core::Sign) -> String {
    format!("{sign:?}").to_lowercase()
}

/// Void-of-course per the configured method. A stationary Moon is
/// never void.
pub fn is_void_of_course(
    positions: &HashMap<Planet, PlanetPosition>,
    config: &Configuration,
) -> bool {
    let moon = &positions[&Planet::Moon];
    if moon.daily_motion == 0.0 {
        return false;
    }

    let candidates = moon_candidates(positions, config);
    let sign = sign_name_lowercase(moon.sign);

    let raw_void = match config.moon.void_method {
        VoidMethod::BySign | VoidMethod::Lilly => !candidates.iter().any(|c| c.applying),
        VoidMethod::ByOrb => !candidates
            .iter()
            .any(|c| c.applying && c.orb <= config.moon.void_orb_degrees),
    };

    if !raw_void {
        return false;
    }

    let dispensed = match config.moon.void_method {
        VoidMethod::Lilly => matches!(sign.as_str(), "cancer" | "taurus" | "sagittarius" | "pisces"),
        VoidMethod::BySign | VoidMethod::ByOrb => config
            .moon
            .void_exception_signs
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&sign)),
    };

    !dispensed
}

/// One of the eight traditional lunar phases, by Sun-Moon elongation
/// measured counterclockwise from the Sun, feeding `general_info.moon_phase`.
pub fn moon_phase(sun_longitude: f64, moon_longitude: f64) -> &'static str {
    let elongation = normalize_degrees(moon_longitude - sun_longitude);
    match (elongation / 45.0).floor() as u8 {
        0 => "New Moon",
        1 => "Waxing Crescent",
        2 => "First Quarter",
        3 => "Waxing Gibbous",
        4 => "Full Moon",
        5 => "Waning Gibbous",
        6 => "Last Quarter",
        _ => "Waning Crescent",
    }
}

/// The lunar mansion (manzil) the Moon currently occupies.
pub fn moon_mansion(moon_longitude: f64) -> &'static str {
    let width = 360.0 / LUNAR_MANSIONS.len() as f64;
    let index = (normalize_degrees(moon_longitude) / width).floor() as usize;
    LUNAR_MANSIONS[index.min(LUNAR_MANSIONS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::chart_with_positions;
    use horary_core::Sign;

    #[test]
    fn last_and_next_reference_distinct_planets() {
        let chart = chart_with_positions(vec![
            (Planet::Moon, Sign::Leo, 1.0),
            (Planet::Sun, Sign::Aries, 0.0),
            (Planet::Venus, Sign::Sagittarius, 3.0),
        ]);
        let config = Configuration::defaults();
        let (last, next) = moon_story(&chart.positions, &config);
        if let (Some(last), Some(next)) = (&last, &next) {
            assert!(last.planet != next.planet || last.aspect != next.aspect);
        }
    }

    #[test]
    fn stationary_moon_is_never_void() {
        let mut chart = chart_with_positions(Vec::new());
        chart.positions.get_mut(&Planet::Moon).unwrap().daily_motion = 0.0;
        let config = Configuration::defaults();
        assert!(!is_void_of_course(&chart.positions, &config));
    }

    #[test]
    fn full_moon_detected_at_180_degrees() {
        assert_eq!(moon_phase(0.0, 180.0), "Full Moon");
    }

    #[test]
    fn new_moon_detected_at_conjunction() {
        assert_eq!(moon_phase(10.0, 11.0), "New Moon");
    }
}
