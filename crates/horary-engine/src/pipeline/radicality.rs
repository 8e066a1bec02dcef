//! Radicality Gate: is the chart fit to be judged at all?

use horary_config::Configuration;
use horary_core::{HoraryChart, Planet, Settings, Sign};

#[derive(Debug, Clone, Default)]
pub struct RadicalityVerdict {
    pub radical: bool,
    /// Reasoning strings, including "bypassed by override" notes.
    pub reasons: Vec<String>,
}

fn ascendant_degree_in_sign(ascendant: f64) -> f64 {
    let (_, degree) = Sign::from_longitude(ascendant);
    degree
}

fn in_via_combusta(sign: Sign, degree: f64, config: &Configuration) -> bool {
    (sign == Sign::Libra && degree >= config.radicality.via_combusta_start_degree)
        || (sign == Sign::Scorpio && degree < config.radicality.via_combusta_end_degree)
}

/// Validate the chart is fit to be judged. Each failing check is still recorded (with
/// an "override" note) even when bypassed, so reasoning never silently
/// reshapes the result.
pub fn check_radicality(chart: &HoraryChart, settings: &Settings, config: &Configuration) -> RadicalityVerdict {
    let mut reasons = Vec::new();
    let mut radical = true;

    let degree = ascendant_degree_in_sign(chart.ascendant);
    if degree < config.radicality.too_early_degrees {
        if settings.ignore_radicality {
            reasons.push(format!(
                "ascendant at {degree:.1}° is too early (premature question) — bypassed by override"
            ));
        } else {
            reasons.push(format!(
                "ascendant at {degree:.1}° is too early in its sign — the question is premature"
            ));
            radical = false;
        }
    } else if degree > config.radicality.too_late_degrees {
        if settings.ignore_radicality {
            reasons.push(format!(
                "ascendant at {degree:.1}° is too late (overripe question) — bypassed by override"
            ));
        } else {
            reasons.push(format!(
                "ascendant at {degree:.1}° is too late in its sign — the matter is already decided"
            ));
            radical = false;
        }
    }

    let saturn_in_7th = chart.position(Planet::Saturn).house == 7;
    if saturn_in_7th {
        if settings.ignore_saturn_7th || config.radicality.saturn_7th_bypassable {
            reasons.push("Saturn in the 7th (astrologer may err) — bypassed by override".to_string());
        } else {
            reasons.push("Saturn is in the 7th house: the astrologer may err in judgment".to_string());
            radical = false;
        }
    }

    if config.radicality.check_via_combusta {
        let moon = chart.position(Planet::Moon);
        if in_via_combusta(moon.sign, moon.degree_in_sign(), config) {
            if settings.ignore_void_moon {
                reasons.push("Moon in Via Combusta — bypassed by override".to_string());
            } else {
                reasons.push("the Moon is in the Via Combusta, an afflicted degree range".to_string());
                radical = false;
            }
        }
    }

    if reasons.is_empty() {
        reasons.push("the chart is radical and fit to be judged".to_string());
    }

    RadicalityVerdict { radical, reasons }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::chart_with_positions;
    use horary_core::Sign;

    #[test]
    fn radical_chart_with_no_disqualifiers() {
        let mut chart = chart_with_positions(vec![(Planet::Moon, Sign::Cancer, 10.0)]);
        chart.ascendant = 15.0;
        let settings = Settings::default();
        let config = Configuration::defaults();
        let verdict = check_radicality(&chart, &settings, &config);
        assert!(verdict.radical);
    }

    #[test]
    fn too_early_ascendant_fails_radicality() {
        let mut chart = chart_with_positions(vec![(Planet::Moon, Sign::Cancer, 10.0)]);
        chart.ascendant = 1.0;
        let settings = Settings::default();
        let config = Configuration::defaults();
        let verdict = check_radicality(&chart, &settings, &config);
        assert!(!verdict.radical);
    }

    #[test]
    fn override_bypasses_too_early_ascendant() {
        let mut chart = chart_with_positions(vec![(Planet::Moon, Sign::Cancer, 10.0)]);
        chart.ascendant = 1.0;
        let settings = Settings {
            ignore_radicality: true,
            ..Settings::default()
        };
        let config = Configuration::defaults();
        let verdict = check_radicality(&chart, &settings, &config);
        assert!(verdict.radical);
        assert!(verdict.reasons.iter().any(|r| r.contains("bypassed by override")));
    }

    #[test]
    fn saturn_in_seventh_fails_radicality_by_default() {
        let mut chart = chart_with_positions(vec![
            (Planet::Moon, Sign::Cancer, 10.0),
            (Planet::Saturn, Sign::Libra, 5.0),
        ]);
        chart.ascendant = 15.0;
        let settings = Settings::default();
        let config = Configuration::defaults();
        let verdict = check_radicality(&chart, &settings, &config);
        assert!(!verdict.radical);
        assert!(verdict.reasons.iter().any(|r| r.contains("may err in judgment")));
    }

    #[test]
    fn override_bypasses_saturn_in_seventh() {
        let mut chart = chart_with_positions(vec![
            (Planet::Moon, Sign::Cancer, 10.0),
            (Planet::Saturn, Sign::Libra, 5.0),
        ]);
        chart.ascendant = 15.0;
        let settings = Settings {
            ignore_saturn_7th: true,
            ..Settings::default()
        };
        let config = Configuration::defaults();
        let verdict = check_radicality(&chart, &settings, &config);
        assert!(verdict.radical);
        assert!(verdict.reasons.iter().any(|r| r.contains("bypassed by override")));
    }

    #[test]
    fn via_combusta_moon_fails_radicality() {
        let mut chart = chart_with_positions(vec![(Planet::Moon, Sign::Libra, 20.0)]);
        chart.ascendant = 15.0;
        let settings = Settings::default();
        let config = Configuration::defaults();
        let verdict = check_radicality(&chart, &settings, &config);
        assert!(!verdict.radical);
    }
}
