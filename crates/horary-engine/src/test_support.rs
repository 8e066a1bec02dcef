//! Chart fixtures shared by unit tests across the pipeline modules.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use horary_core::{
    AspectInfo, HoraryChart, Planet, PlanetPosition, Sign, SolarCondition, SolarConditionKind,
};

use crate::houses::{equal_house_cusps, house_for_longitude, house_rulers_from_cusps};

/// A chart with the ascendant at 0° Aries and every planet at 15° Aries,
/// in house 1, with `Free` solar condition and no aspects. Callers override
/// the planets they care about with [`chart_with_positions`].
pub fn base_chart() -> HoraryChart {
    chart_with_positions(Vec::new())
}

/// Build a chart with the ascendant at 0° Aries, overriding the listed
/// planets' sign and degree-within-sign; every other planet stays at 15°
/// Aries. Intended for single-concern unit tests, not full scenario tests
/// (see `horary-engine/tests/judgment_scenarios.rs` for those).
pub fn chart_with_positions(overrides: Vec<(Planet, Sign, f64)>) -> HoraryChart {
    let cusps = equal_house_cusps(0.0);
    let house_rulers = house_rulers_from_cusps(&cusps);

    let mut overrides_map: HashMap<Planet, (Sign, f64)> = HashMap::new();
    for (planet, sign, degree) in overrides {
        overrides_map.insert(planet, (sign, degree));
    }

    let mut positions = HashMap::new();
    for planet in horary_core::ALL_PLANETS {
        let (sign, degree) = overrides_map
            .get(&planet)
            .copied()
            .unwrap_or((Sign::Aries, 15.0));
        let longitude = (sign.start_degree() + degree).rem_euclid(360.0);
        let house = house_for_longitude(&cusps, longitude);
        positions.insert(
            planet,
            PlanetPosition {
                planet,
                longitude,
                latitude: 0.0,
                daily_motion: planet.mean_daily_motion(),
                sign,
                house,
                dignity_score: 0,
            },
        );
    }

    let mut solar_conditions = HashMap::new();
    for planet in horary_core::ALL_PLANETS {
        solar_conditions.insert(
            planet,
            SolarCondition {
                kind: SolarConditionKind::Free,
                distance_from_sun: 90.0,
                exact_cazimi: false,
                traditional_exception: false,
            },
        );
    }

    let local = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    HoraryChart {
        local_datetime: local,
        utc_datetime: local.and_utc(),
        timezone: "UTC".to_string(),
        latitude: 0.0,
        longitude: 0.0,
        location_name: "Test Fixture".to_string(),
        julian_day: 2_460_311.0,
        ascendant: 0.0,
        midheaven: 270.0,
        house_cusps: cusps,
        house_rulers,
        positions,
        aspects: Vec::<AspectInfo>::new(),
        solar_conditions,
        moon_last_aspect: None,
        moon_next_aspect: None,
    }
}

/// Helper for tests that want a specific `NaiveDateTime` without pulling in
/// the full date-parsing module.
pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn utc_now_placeholder() -> chrono::DateTime<Utc> {
    datetime(2024, 1, 1, 12, 0).and_utc()
}
