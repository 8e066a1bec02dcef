//! Denial & Prohibition Detector: intervening malefic aspects that
//! complete before perfection, impediment denials, and domain-specific
//! denials layered on top of the general checks.

use horary_config::Configuration;
use horary_core::{HoraryChart, Planet, QuestionType, SolarConditionKind};

#[derive(Debug, Clone, Default)]
pub struct DenialVerdict {
    pub denied: bool,
    pub reasons: Vec<String>,
    /// Confidence penalty accumulated by the denials found (not applied by
    /// this module — the Judgment Composer owns confidence arithmetic).
    pub confidence_penalty: u8,
}

impl DenialVerdict {
    fn push(&mut self, denied: bool, reason: String, penalty: u8) {
        if denied {
            self.denied = true;
            self.confidence_penalty = self.confidence_penalty.saturating_add(penalty);
        }
        self.reasons.push(reason);
    }
}

/// Prohibition: a third body completing an aspect to either significator
/// before the direct aspect between them perfects.
pub fn check_prohibition(
    chart: &HoraryChart,
    querent: Planet,
    quesited: Planet,
    config: &Configuration,
) -> DenialVerdict {
    let mut verdict = DenialVerdict::default();

    let Some(direct) = chart.aspect_between(querent, quesited).filter(|a| a.applying) else {
        return verdict;
    };

    for prohibitor in horary_core::ALL_PLANETS {
        if prohibitor == querent || prohibitor == quesited {
            continue;
        }
        for target in [querent, quesited] {
            let Some(candidate) = chart.aspect_between(prohibitor, target) else { continue };
            if !candidate.applying || candidate.degrees_to_exact >= direct.degrees_to_exact {
                continue;
            }

            let reception = crate::pipeline::reception::reception_between(chart, prohibitor, target);
            let base_penalty = match prohibitor {
                Planet::Saturn => config.confidence.prohibition_penalty_saturn,
                Planet::Mars => config.confidence.prohibition_penalty_mars,
                _ => config.confidence.prohibition_penalty_other,
            };
            let penalty = if reception.is_reception() {
                base_penalty.saturating_sub(config.confidence.prohibition_reception_softening)
            } else {
                base_penalty
            };

            verdict.push(
                true,
                format!(
                    "{} perfects an aspect to {} before {} and {} can perfect: the matter is prohibited{}",
                    prohibitor.name(),
                    target.name(),
                    querent.name(),
                    quesited.name(),
                    if reception.is_reception() { " (softened by reception)" } else { "" }
                ),
                penalty,
            );
        }
    }

    verdict
}

/// Impediment denial: two or more severe impediments on the significators
/// force a denial regardless of perfection.
pub fn check_impediment_denial(chart: &HoraryChart, querent: Planet, quesited: Planet, config: &Configuration) -> DenialVerdict {
    let mut verdict = DenialVerdict::default();
    let mut severe_count = 0;

    for planet in [querent, quesited] {
        let solar = chart.solar_condition(planet);
        let position = chart.position(planet);
        let extreme_combustion =
            solar.kind == SolarConditionKind::Combustion && solar.distance_from_sun < config.retrograde.extreme_combustion_degrees;
        let weak_and_combust = position.dignity_score <= config.retrograde.severe_dignity_threshold
            && solar.kind == SolarConditionKind::Combustion
            && solar.distance_from_sun < config.retrograde.weak_combust_degrees;
        if extreme_combustion || weak_and_combust {
            severe_count += 1;
            verdict
                .reasons
                .push(format!("{} is severely impeded (combustion within {:.1}°)", planet.name(), solar.distance_from_sun));
        }
    }

    if severe_count >= 2 {
        verdict.denied = true;
        verdict.confidence_penalty = config.confidence.impediment_denial_penalty;
        verdict
            .reasons
            .push("two or more severe impediments force a denial regardless of perfection".to_string());
    }

    verdict
}

/// Domain-specific denials layered after the general checks.
pub fn check_domain_denial(
    chart: &HoraryChart,
    question_type: QuestionType,
    querent: Planet,
    quesited: Planet,
    config: &Configuration,
) -> DenialVerdict {
    let mut verdict = DenialVerdict::default();

    match question_type {
        QuestionType::LostObject => {
            let penalty = config.confidence.domain_denial_penalty;
            let l2 = chart.position(quesited);
            if l2.is_cadent() && l2.dignity_score <= config.dignity.lost_object_weak_dignity_threshold {
                verdict.push(true, format!("{} (L2) is cadent and weakly dignified", quesited.name()), penalty);
            }
            for significator in [querent, quesited] {
                if chart.solar_condition(significator).kind == SolarConditionKind::Combustion {
                    verdict.push(true, format!("{} is combust", significator.name()), penalty);
                }
            }
            if crate::pipeline::moon::is_void_of_course(&chart.positions, config) {
                verdict.push(true, "the Moon is void of course".to_string(), penalty);
            }
            if chart.position(Planet::Saturn).house == 7 {
                verdict.push(true, "Saturn is in the 7th house".to_string(), penalty);
            }
            let mars = chart.position(Planet::Mars);
            if mars.dignity_score > 0 {
                if let Some(aspect) = chart.aspect_between(Planet::Mars, querent).or_else(|| chart.aspect_between(Planet::Mars, quesited)) {
                    if aspect.aspect == horary_core::Aspect::Opposition {
                        verdict.push(true, "a well-dignified Mars opposes the significators".to_string(), penalty);
                    }
                }
            }
        }
        QuestionType::Travel if quesited == Planet::Jupiter => {
            let mut forcing = 0;
            let jupiter = chart.position(Planet::Jupiter);
            if jupiter.is_retrograde() && jupiter.dignity_score < 0 {
                forcing += 1;
                verdict.reasons.push("Jupiter is retrograde and debilitated".to_string());
            }
            if jupiter.house == 6 {
                forcing += 1;
                verdict.reasons.push("Jupiter is in the 6th house".to_string());
            }
            if chart.position(querent).house == 8 {
                forcing += 1;
                verdict.reasons.push("the querent's significator is in the 8th house".to_string());
            }
            if chart.position(Planet::Moon).house == 6 {
                forcing += 1;
                verdict.reasons.push("the Moon is in the 6th house".to_string());
            }
            if forcing >= 2 {
                verdict.denied = true;
                verdict.confidence_penalty = config.confidence.travel_denial_penalty;
                verdict
                    .reasons
                    .push("multiple travel-denial factors force a denial".to_string());
            }
        }
        _ => {}
    }

    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::chart_with_positions;
    use horary_core::Sign;

    #[test]
    fn prohibition_by_closer_aspect_denies() {
        // Venus at 4' Aries applies to Mars at 10' Leo by trine (orb 6, applying).
        // Saturn at 12' Leo is 2' ahead of Mars on the same arc: Mars (faster)
        // applies to a conjunction with Saturn at orb 2 — closer and also
        // applying, so it perfects first and prohibits the direct trine.
        let config = Configuration::defaults();
        let mut chart = chart_with_positions(vec![
            (Planet::Venus, Sign::Aries, 4.0),
            (Planet::Mars, Sign::Leo, 10.0),
            (Planet::Saturn, Sign::Leo, 12.0),
        ]);
        chart.aspects = crate::pipeline::aspects::compute_aspects(&chart.positions, &config);
        let verdict = check_prohibition(&chart, Planet::Venus, Planet::Mars, &config);
        assert!(verdict.denied);
        assert!(verdict.reasons.iter().any(|r| r.contains("Saturn") && r.contains("prohibit")));
    }

    #[test]
    fn two_severe_impediments_force_denial() {
        let config = Configuration::defaults();
        let mut chart = chart_with_positions(vec![(Planet::Sun, Sign::Aries, 10.0), (Planet::Mercury, Sign::Aries, 10.4)]);
        chart.solar_conditions.insert(
            Planet::Mercury,
            horary_core::SolarCondition {
                kind: SolarConditionKind::Combustion,
                distance_from_sun: 0.4,
                exact_cazimi: false,
                traditional_exception: false,
            },
        );
        chart.positions.get_mut(&Planet::Mercury).unwrap().dignity_score = -6;
        chart.solar_conditions.insert(
            Planet::Venus,
            horary_core::SolarCondition {
                kind: SolarConditionKind::Combustion,
                distance_from_sun: 0.2,
                exact_cazimi: false,
                traditional_exception: false,
            },
        );
        chart.positions.get_mut(&Planet::Venus).unwrap().dignity_score = -6;
        let verdict = check_impediment_denial(&chart, Planet::Mercury, Planet::Venus, &config);
        assert!(verdict.denied);
    }

    #[test]
    fn lost_object_denied_when_moon_void_and_saturn_in_seventh() {
        let config = Configuration::defaults();
        // Every body sits at 15' Aries (house 1) except Saturn, placed in
        // house 7, and the Moon, moved to 20' Scorpio where it forms no
        // aspect at all with any other body: void of course under BySign.
        let chart = chart_with_positions(vec![
            (Planet::Saturn, Sign::Libra, 15.0),
            (Planet::Moon, Sign::Scorpio, 20.0),
        ]);
        let verdict = check_domain_denial(&chart, QuestionType::LostObject, Planet::Mercury, Planet::Venus, &config);
        assert!(verdict.denied);
        assert!(verdict.reasons.iter().any(|r| r.contains("void of course")));
        assert!(verdict.reasons.iter().any(|r| r.contains("7th house")));
    }
}
