//! Aspect Engine: current applying/separating aspects between every
//! pair of the seven bodies, with moiety-based orbs and sign-exit validity.

use horary_core::geometry::shorter_arc;
use horary_core::{AspectInfo, HoraryChart, Planet, PlanetPosition, ALL_ASPECTS, ALL_PLANETS};
use horary_config::Configuration;

/// All current aspects in the chart, at most one per pair, closest to
/// exact.
pub fn compute_aspects(
    positions: &std::collections::HashMap<Planet, PlanetPosition>,
    config: &Configuration,
) -> Vec<AspectInfo> {
    let mut aspects = Vec::new();
    for i in 0..ALL_PLANETS.len() {
        for j in (i + 1)..ALL_PLANETS.len() {
            let a = ALL_PLANETS[i];
            let b = ALL_PLANETS[j];
            let pos_a = &positions[&a];
            let pos_b = &positions[&b];
            if let Some(info) = aspect_between(pos_a, pos_b, config) {
                aspects.push(info);
            }
        }
    }
    aspects
}

/// Recompute the aspect, if any, between two specific positions. Exposed
/// separately so the Perfection Detector can re-test a hypothetical pair
/// (e.g. a translator body) without recomputing the whole chart.
pub fn aspect_between(a: &PlanetPosition, b: &PlanetPosition, config: &Configuration) -> Option<AspectInfo> {
    let separation = shorter_arc(a.longitude, b.longitude);

    let mut best: Option<(horary_core::Aspect, f64)> = None;
    for aspect in ALL_ASPECTS {
        let combined_moiety = (a.planet.moiety() + b.planet.moiety()) * aspect.moiety_scale();
        let orb = (separation - aspect.degrees()).abs();
        if orb <= combined_moiety {
            if best.map(|(_, best_orb)| orb < best_orb).unwrap_or(true) {
                best = Some((aspect, orb));
            }
        }
    }

    let (aspect, orb) = best?;

    let increment = config.retrograde.projection_increment_days;
    let proj_a = (a.longitude + a.daily_motion * increment).rem_euclid(360.0);
    let proj_b = (b.longitude + b.daily_motion * increment).rem_euclid(360.0);
    let new_separation = shorter_arc(proj_a, proj_b);
    let new_orb = (new_separation - aspect.degrees()).abs();

    let shrink_rate = (orb - new_orb) / increment;
    let mut applying = new_orb < orb;

    let days_to_exact = if applying && shrink_rate.abs() > f64::EPSILON {
        Some(orb / shrink_rate)
    } else {
        None
    };

    // An applying aspect must perfect before either body exits its current
    // sign in its current direction of motion.
    if applying {
        if let Some(days) = days_to_exact {
            let exit_a = a.days_to_sign_exit();
            let exit_b = b.days_to_sign_exit();
            let exceeds_a = exit_a.map(|exit| days > exit).unwrap_or(false);
            let exceeds_b = exit_b.map(|exit| days > exit).unwrap_or(false);
            if exceeds_a || exceeds_b {
                applying = false;
            }
        } else {
            applying = false;
        }
    }

    Some(AspectInfo {
        body_a: a.planet,
        body_b: b.planet,
        aspect,
        orb,
        applying,
        degrees_to_exact: orb,
        days_to_exact: if applying { days_to_exact } else { None },
    })
}
