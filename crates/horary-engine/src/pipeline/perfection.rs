//! Perfection Detector: searches for direct / translation /
//! collection / reception perfection, in that exact order — first match
//! wins, whether the match is favorable or a denial.

use horary_config::Configuration;
use horary_core::{Aspect, HoraryChart, Planet, SolarConditionKind};

use crate::pipeline::reception::{reception_between, ReceptionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerfectionKind {
    DirectAspect,
    Translation,
    Collection,
    ReceptionOnly,
}

#[derive(Debug, Clone)]
pub struct Perfection {
    pub kind: PerfectionKind,
    pub favorable: bool,
    pub confidence: u8,
    pub reasoning: Vec<String>,
    pub translator: Option<Planet>,
    pub collector: Option<Planet>,
}

#[derive(Debug, Clone)]
pub enum PerfectionOutcome {
    Perfected(Perfection),
    /// A match was found but it resolves as a denial, not a perfection
    /// (combustion on the conjunction leg, or a cadent/weak significator
    /// without reception).
    Denied { reason: String },
    None,
}

fn is_weak_or_cadent(chart: &HoraryChart, planet: Planet, config: &Configuration) -> bool {
    let position = chart.position(planet);
    position.is_cadent() || position.dignity_score < config.dignity.cadent_weak_dignity_threshold
}

/// (a) Direct aspect between the two significators.
fn direct_aspect(chart: &HoraryChart, querent: Planet, quesited: Planet, config: &Configuration) -> PerfectionOutcome {
    let Some(info) = chart.aspect_between(querent, quesited) else {
        return PerfectionOutcome::None;
    };
    if !info.applying {
        return PerfectionOutcome::None;
    }

    if info.aspect == Aspect::Conjunction && (querent == Planet::Sun || quesited == Planet::Sun) {
        let other = if querent == Planet::Sun { quesited } else { querent };
        if chart.solar_condition(other).kind == SolarConditionKind::Combustion {
            return PerfectionOutcome::Denied {
                reason: format!(
                    "{} applies to conjunction with the Sun but is combust: reclassified as combustion denial, not perfection",
                    other.name()
                ),
            };
        }
    }

    let reception = reception_between(chart, querent, quesited);

    match reception.kind {
        ReceptionKind::MutualRulership => PerfectionOutcome::Perfected(Perfection {
            kind: PerfectionKind::DirectAspect,
            favorable: true,
            confidence: config.confidence.mutual_rulership_confidence,
            reasoning: vec![format!(
                "{} applies to {} by {:?}, in mutual reception by rulership — a strong, direct perfection",
                querent.name(),
                quesited.name(),
                info.aspect
            )],
            translator: None,
            collector: None,
        }),
        ReceptionKind::MutualExaltation => PerfectionOutcome::Perfected(Perfection {
            kind: PerfectionKind::DirectAspect,
            favorable: true,
            confidence: (config.confidence.base_confidence + config.confidence.mutual_exaltation_bonus).min(100),
            reasoning: vec![format!(
                "{} applies to {} by {:?}, in mutual reception by exaltation",
                querent.name(),
                quesited.name(),
                info.aspect
            )],
            translator: None,
            collector: None,
        }),
        _ => {
            let weak_or_cadent = is_weak_or_cadent(chart, querent, config) || is_weak_or_cadent(chart, quesited, config);
            if weak_or_cadent && !reception.is_reception() {
                let weak_name = if is_weak_or_cadent(chart, querent, config) {
                    querent.name()
                } else {
                    quesited.name()
                };
                return PerfectionOutcome::Denied {
                    reason: format!(
                        "{} applies to {} by {:?}, but {} is cadent or weakly dignified with no reception to compensate",
                        querent.name(),
                        quesited.name(),
                        info.aspect,
                        weak_name
                    ),
                };
            }

            let favorable = info.aspect.is_base_favorable();
            let mut confidence = config.confidence.base_confidence;
            if reception.is_reception() {
                confidence = confidence.saturating_add(config.confidence.reception_bonus);
            }

            PerfectionOutcome::Perfected(Perfection {
                kind: PerfectionKind::DirectAspect,
                favorable,
                confidence: confidence.min(100),
                reasoning: vec![format!(
                    "{} applies to {} by {:?} ({})",
                    querent.name(),
                    quesited.name(),
                    info.aspect,
                    reception.display()
                )],
                translator: None,
                collector: None,
            })
        }
    }
}

/// (b) Translation of light: only attempted when no direct aspect
/// was found.
fn translation_of_light(chart: &HoraryChart, querent: Planet, quesited: Planet, config: &Configuration) -> PerfectionOutcome {
    for translator in horary_core::ALL_PLANETS {
        if translator == querent || translator == quesited {
            continue;
        }
        let Some(separating) = chart.aspect_between(translator, querent) else { continue };
        let Some(applying) = chart.aspect_between(translator, quesited) else { continue };
        if separating.applying || applying.orb > config.orbs.translation_application_max {
            continue;
        }
        if separating.orb > config.orbs.translation_separation_max {
            continue;
        }
        if !applying.applying {
            continue;
        }

        let t_speed = chart.position(translator).daily_motion.abs();
        let q1_speed = chart.position(querent).daily_motion.abs();
        let q2_speed = chart.position(quesited).daily_motion.abs();
        if t_speed <= q1_speed || t_speed <= q2_speed {
            continue;
        }

        let intervening = chart
            .aspects_of(translator)
            .filter(|a| a.applying && !a.involves(quesited))
            .any(|a| a.degrees_to_exact < applying.degrees_to_exact);
        if intervening {
            continue;
        }

        let reception_with_querent = reception_between(chart, translator, querent);
        let reception_with_quesited = reception_between(chart, translator, quesited);
        let received = reception_with_querent.is_reception() || reception_with_quesited.is_reception();

        let mut confidence = config.confidence.base_confidence.saturating_add(config.confidence.translation_bonus);
        let mut favorable = true;
        if separating.aspect.is_hard() || applying.aspect.is_hard() {
            if received {
                confidence = confidence.saturating_sub(config.confidence.hard_aspect_reception_penalty);
            } else {
                favorable = false;
            }
        }
        if received {
            confidence = confidence.saturating_add(config.confidence.reception_bonus);
        }
        if chart.solar_condition(translator).kind == SolarConditionKind::Combustion {
            confidence = confidence.saturating_sub(config.confidence.carrier_combustion_penalty);
        }

        return PerfectionOutcome::Perfected(Perfection {
            kind: PerfectionKind::Translation,
            favorable,
            confidence: confidence.min(100),
            reasoning: vec![format!(
                "{} translates light from {} to {}, separating by {:?} and applying by {:?}",
                translator.name(),
                querent.name(),
                quesited.name(),
                separating.aspect,
                applying.aspect
            )],
            translator: Some(translator),
            collector: None,
        });
    }
    PerfectionOutcome::None
}

/// (c) Collection of light: only attempted when no direct aspect or
/// translation was found.
fn collection_of_light(chart: &HoraryChart, querent: Planet, quesited: Planet, config: &Configuration) -> PerfectionOutcome {
    for collector in horary_core::ALL_PLANETS {
        if collector == querent || collector == quesited {
            continue;
        }
        let Some(leg_a) = chart.aspect_between(querent, collector) else { continue };
        let Some(leg_b) = chart.aspect_between(quesited, collector) else { continue };
        if !leg_a.applying || !leg_b.applying {
            continue;
        }

        let c_speed = chart.position(collector).daily_motion.abs();
        let q1_speed = chart.position(querent).daily_motion.abs();
        let q2_speed = chart.position(quesited).daily_motion.abs();
        if c_speed >= q1_speed || c_speed >= q2_speed {
            continue;
        }

        let receives_querent = reception_between(chart, querent, collector).receives(querent);
        let receives_quesited = reception_between(chart, quesited, collector).receives(quesited);
        if !receives_querent || !receives_quesited {
            continue;
        }

        let mut confidence = config.confidence.base_confidence.saturating_add(config.confidence.collection_bonus);
        let mut favorable = true;
        if leg_a.aspect.is_hard() || leg_b.aspect.is_hard() {
            favorable = false;
            confidence = confidence.saturating_sub(config.confidence.hard_aspect_reception_penalty);
        }
        if is_weak_or_cadent(chart, collector, config) {
            confidence = confidence.saturating_sub(config.confidence.weak_collector_penalty);
        }

        return PerfectionOutcome::Perfected(Perfection {
            kind: PerfectionKind::Collection,
            favorable,
            confidence: confidence.min(100),
            reasoning: vec![format!(
                "{} and {} both apply to {}, which receives each in essential dignity: collection of light",
                querent.name(),
                quesited.name(),
                collector.name()
            )],
            translator: None,
            collector: Some(collector),
        });
    }
    PerfectionOutcome::None
}

/// (d) Reception-only perfection: with no aspect at all, mutual
/// rulership or mutual exaltation alone still perfects the matter.
fn reception_only(chart: &HoraryChart, querent: Planet, quesited: Planet, config: &Configuration) -> PerfectionOutcome {
    let reception = reception_between(chart, querent, quesited);
    match reception.kind {
        ReceptionKind::MutualRulership => PerfectionOutcome::Perfected(Perfection {
            kind: PerfectionKind::ReceptionOnly,
            favorable: true,
            confidence: config.confidence.mutual_rulership_confidence,
            reasoning: vec![format!(
                "{} and {} are in mutual reception by rulership with no aspect between them: reception alone perfects the matter",
                querent.name(),
                quesited.name()
            )],
            translator: None,
            collector: None,
        }),
        ReceptionKind::MutualExaltation => PerfectionOutcome::Perfected(Perfection {
            kind: PerfectionKind::ReceptionOnly,
            favorable: true,
            confidence: (config.confidence.base_confidence + config.confidence.mutual_exaltation_bonus).min(100),
            reasoning: vec![format!(
                "{} and {} are in mutual reception by exaltation with no aspect between them",
                querent.name(),
                quesited.name()
            )],
            translator: None,
            collector: None,
        }),
        _ => PerfectionOutcome::None,
    }
}

/// Run the perfection waterfall in its exact documented order: direct aspect,
/// then translation, then collection, then reception-only. Reordering these
/// changes outcomes, so callers should not reach for the sub-checks directly.
pub fn detect_perfection(chart: &HoraryChart, querent: Planet, quesited: Planet, config: &Configuration) -> PerfectionOutcome {
    match direct_aspect(chart, querent, quesited, config) {
        PerfectionOutcome::None => {}
        outcome => return outcome,
    }
    match translation_of_light(chart, querent, quesited, config) {
        PerfectionOutcome::None => {}
        outcome => return outcome,
    }
    match collection_of_light(chart, querent, quesited, config) {
        PerfectionOutcome::None => {}
        outcome => return outcome,
    }
    reception_only(chart, querent, quesited, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::chart_with_positions;
    use horary_core::Sign;

    #[test]
    fn mutual_rulership_direct_aspect_perfects() {
        let chart = chart_with_positions(vec![
            (Planet::Mars, Sign::Taurus, 10.0),
            (Planet::Venus, Sign::Aries, 12.0),
        ]);
        let config = Configuration::defaults();
        match detect_perfection(&chart, Planet::Mars, Planet::Venus, &config) {
            PerfectionOutcome::Perfected(p) => assert!(p.favorable),
            other => panic!("expected perfection, got {other:?}"),
        }
    }

    #[test]
    fn no_aspect_and_no_reception_yields_none() {
        let chart = chart_with_positions(vec![
            (Planet::Mars, Sign::Gemini, 10.0),
            (Planet::Venus, Sign::Capricorn, 20.0),
        ]);
        let config = Configuration::defaults();
        assert!(matches!(
            detect_perfection(&chart, Planet::Mars, Planet::Venus, &config),
            PerfectionOutcome::None
        ));
    }

    #[test]
    fn combustion_on_conjunction_with_sun_denies_not_perfects() {
        // Mercury at 9.5° Aries applying to the Sun at 10° Aries by conjunction,
        // within combustion range.
        let mut chart = chart_with_positions(vec![
            (Planet::Sun, Sign::Aries, 10.0),
            (Planet::Mercury, Sign::Aries, 9.5),
        ]);
        let config = Configuration::defaults();
        chart.aspects = crate::pipeline::aspects::compute_aspects(&chart.positions, &config);
        chart.solar_conditions.insert(
            Planet::Mercury,
            horary_core::SolarCondition {
                kind: SolarConditionKind::Combustion,
                distance_from_sun: 0.5,
                exact_cazimi: false,
                traditional_exception: false,
            },
        );
        match detect_perfection(&chart, Planet::Sun, Planet::Mercury, &config) {
            PerfectionOutcome::Denied { reason } => assert!(reason.contains("combust")),
            other => panic!("expected combustion denial, got {other:?}"),
        }
    }
}
