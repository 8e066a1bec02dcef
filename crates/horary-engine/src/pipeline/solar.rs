//! Solar Condition Analyzer: classifies each body's relation to
//! the Sun, with the Mercury/Venus visibility exceptions.

use std::collections::HashMap;

use horary_config::Configuration;
use horary_core::geometry::shorter_arc;
use horary_core::{Planet, PlanetPosition, Sign, SolarCondition, SolarConditionKind};

/// Classify every body's solar condition. The Sun itself is always `Free`
/// at distance 0.
pub fn compute_solar_conditions(
    positions: &HashMap<Planet, PlanetPosition>,
    config: &Configuration,
) -> HashMap<Planet, SolarCondition> {
    let sun_longitude = positions[&Planet::Sun].longitude;
    let mut out = HashMap::new();
    out.insert(
        Planet::Sun,
        SolarCondition {
            kind: SolarConditionKind::Free,
            distance_from_sun: 0.0,
            exact_cazimi: false,
            traditional_exception: false,
        },
    );

    for planet in horary_core::ALL_PLANETS {
        if planet == Planet::Sun {
            continue;
        }
        let position = &positions[&planet];
        out.insert(planet, solar_condition_for(position, sun_longitude, config));
    }
    out
}

fn solar_condition_for(position: &PlanetPosition, sun_longitude: f64, config: &Configuration) -> SolarCondition {
    let distance = shorter_arc(position.longitude, sun_longitude);
    let exact_cazimi = distance <= config.orbs.exact_cazimi_arcminutes / 60.0;
    let traditional_exception = visibility_exception(position.planet, position.sign, distance);

    let kind = if distance <= config.orbs.cazimi_degrees {
        SolarConditionKind::Cazimi
    } else if distance <= config.orbs.combustion_degrees {
        if traditional_exception {
            SolarConditionKind::Free
        } else {
            SolarConditionKind::Combustion
        }
    } else if distance <= config.orbs.under_beams_degrees {
        if traditional_exception {
            SolarConditionKind::Free
        } else {
            SolarConditionKind::UnderBeams
        }
    } else {
        SolarConditionKind::Free
    };

    SolarCondition {
        kind,
        distance_from_sun: distance,
        exact_cazimi,
        traditional_exception,
    }
}

/// Mercury and Venus have traditional visibility exceptions that let them
/// escape combustion/under-beams despite close proximity to the Sun.
/// The exception never applies to other bodies.
///
/// Venus's classical exception also requires the Sun to be below civil
/// twilight; that needs the observer's local horizon altitude of the Sun,
/// which this purely-longitude-based analyzer does not receive, so the
/// engine conservatively only grants Venus's exception at the
/// twilight-independent 40° elongation band (documented in DESIGN.md).
fn visibility_exception(planet: Planet, sign: Sign, elongation: f64) -> bool {
    match planet {
        Planet::Mercury => {
            elongation >= 18.0 || (matches!(sign, Sign::Gemini | Sign::Virgo) && elongation >= 10.0)
        }
        Planet::Venus => elongation >= 40.0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::chart_with_positions;

    #[test]
    fn exact_cazimi_within_arcminutes() {
        let chart = chart_with_positions(vec![(Planet::Sun, Sign::Aries, 10.0), (Planet::Mercury, Sign::Aries, 10.001)]);
        let config = Configuration::defaults();
        let conditions = compute_solar_conditions(&chart.positions, &config);
        assert!(conditions[&Planet::Mercury].exact_cazimi);
        assert_eq!(conditions[&Planet::Mercury].kind, SolarConditionKind::Cazimi);
    }

    #[test]
    fn combustion_at_five_degrees() {
        let chart = chart_with_positions(vec![(Planet::Sun, Sign::Aries, 10.0), (Planet::Saturn, Sign::Aries, 15.0)]);
        let config = Configuration::defaults();
        let conditions = compute_solar_conditions(&chart.positions, &config);
        assert_eq!(conditions[&Planet::Saturn].kind, SolarConditionKind::Combustion);
    }

    #[test]
    fn under_beams_at_nine_degrees() {
        let chart = chart_with_positions(vec![(Planet::Sun, Sign::Aries, 10.0), (Planet::Saturn, Sign::Aries, 19.0)]);
        let config = Configuration::defaults();
        let conditions = compute_solar_conditions(&chart.positions, &config);
        assert_eq!(conditions[&Planet::Saturn].kind, SolarConditionKind::UnderBeams);
    }

    #[test]
    fn mercury_exception_in_own_sign_escapes_combustion() {
        let chart = chart_with_positions(vec![(Planet::Sun, Sign::Gemini, 5.0), (Planet::Mercury, Sign::Gemini, 16.0)]);
        let config = Configuration::defaults();
        let conditions = compute_solar_conditions(&chart.positions, &config);
        assert_eq!(conditions[&Planet::Mercury].kind, SolarConditionKind::Free);
        assert!(conditions[&Planet::Mercury].traditional_exception);
    }
}
