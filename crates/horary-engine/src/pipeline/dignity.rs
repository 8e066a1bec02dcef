//! Dignity Scorer: composes essential + accidental dignity, motion,
//! sect, and solar condition into one signed integer per body.

use horary_config::Configuration;
use horary_core::{Planet, PlanetPosition, Sign, SolarCondition, SolarConditionKind};

use crate::houses::degrees_to_nearest_angular_cusp;

/// Traditional house joys: the house in which each planet is said to
/// rejoice, carrying a small accidental bonus.
fn joy_house(planet: Planet) -> u8 {
    match planet {
        Planet::Mercury => 1,
        Planet::Moon => 3,
        Planet::Venus => 5,
        Planet::Mars => 6,
        Planet::Sun => 9,
        Planet::Jupiter => 11,
        Planet::Saturn => 12,
    }
}

fn essential_dignity(planet: Planet, sign: Sign, is_day_chart: bool, weights: &horary_config::DignityWeights) -> i32 {
    let mut score = 0;
    if planet.domiciles().contains(&sign) {
        score += weights.domicile;
    }
    if planet.exaltation() == Some(sign) {
        score += weights.exaltation;
    }
    if sign.triplicity_ruler(is_day_chart) == planet {
        score += weights.triplicity;
    }
    if planet.detriments().contains(&sign) {
        score += weights.detriment;
    }
    if planet.fall() == Some(sign) {
        score += weights.fall;
    }
    score
}

/// Angularity including the 5° rule: a body within `angular_cusp_orb_degrees`
/// of an angular cusp (1/4/7/10) counts as angular regardless of its
/// assigned house.
fn angularity_score(position: &PlanetPosition, cusps: &[f64; 12], weights: &horary_config::DignityWeights) -> i32 {
    let near_angular_cusp = degrees_to_nearest_angular_cusp(cusps, position.longitude) <= weights.angular_cusp_orb_degrees;
    if position.is_angular() || near_angular_cusp {
        weights.angular
    } else if position.is_succedent() {
        weights.succedent
    } else {
        weights.cadent
    }
}

fn motion_score(position: &PlanetPosition, weights: &horary_config::DignityWeights) -> i32 {
    let mean = position.planet.mean_daily_motion();
    let speed = position.daily_motion.abs();
    let mut score = 0;
    if speed > mean {
        score += weights.fast_speed_bonus;
    } else if speed < mean * weights.stationary_speed_fraction {
        score += weights.near_stationary_penalty;
    }
    if position.is_retrograde() {
        score += weights.retrograde_penalty;
    }
    score
}

/// Above-horizon per this engine's sect convention: [`HoraryChart::is_day_chart`]
/// treats houses 7-12 as below the horizon, so the complement (1-6) is above it.
fn is_above_horizon(house: u8) -> bool {
    matches!(house, 1..=6)
}

fn sect_score(planet: Planet, house: u8, is_day_chart: bool, weights: &horary_config::DignityWeights) -> i32 {
    if planet == Planet::Mercury {
        return 0;
    }
    let above_horizon = is_above_horizon(house);
    let in_sect = (planet.is_diurnal() && is_day_chart && above_horizon)
        || (planet.is_nocturnal() && !is_day_chart && !above_horizon);
    let out_of_sect = (planet.is_diurnal() && (!is_day_chart || !above_horizon))
        || (planet.is_nocturnal() && (is_day_chart || above_horizon));
    if in_sect {
        weights.hayz_bonus
    } else if out_of_sect {
        weights.contrariety_penalty
    } else {
        0
    }
}

/// Composes the full signed dignity score for one body. `Cazimi`
/// overrides all negative contributions; combustion/under-beams penalties
/// only apply when the Solar Condition Analyzer did not already grant a
/// traditional exception (it reports `Free` in that case).
pub fn score_dignity(
    position: &PlanetPosition,
    cusps: &[f64; 12],
    is_day_chart: bool,
    solar_condition: &SolarCondition,
    config: &Configuration,
) -> i32 {
    let weights = &config.dignity;
    let planet = position.planet;

    let mut positive = 0;
    let mut negative = 0;

    let essential = essential_dignity(planet, position.sign, is_day_chart, weights);
    if essential >= 0 {
        positive += essential;
    } else {
        negative += essential;
    }

    if joy_house(planet) == position.house {
        positive += weights.house_joy;
    }

    let angularity = angularity_score(position, cusps, weights);
    if angularity >= 0 {
        positive += angularity;
    } else {
        negative += angularity;
    }

    let motion = motion_score(position, weights);
    if motion >= 0 {
        positive += motion;
    } else {
        negative += motion;
    }

    let sect = sect_score(planet, position.house, is_day_chart, weights);
    if sect >= 0 {
        positive += sect;
    } else {
        negative += sect;
    }

    match solar_condition.kind {
        SolarConditionKind::Cazimi => {
            let bonus = if solar_condition.exact_cazimi {
                weights.exact_cazimi_bonus
            } else {
                weights.cazimi_bonus
            };
            // Cazimi overrides all negatives: only positives survive.
            positive + bonus
        }
        SolarConditionKind::Combustion => positive + negative + weights.combustion_penalty,
        SolarConditionKind::UnderBeams => positive + negative + weights.under_beams_penalty,
        SolarConditionKind::Free => positive + negative,
    }
}
