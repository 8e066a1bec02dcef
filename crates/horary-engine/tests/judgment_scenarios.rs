//! Full-waterfall scenarios: a built chart plus resolved significators,
//! run end to end through [`horary_engine::pipeline::judgment::compose_judgment`],
//! and (for one scenario) the complete [`horary_engine::judge`] entry point.
//! Single-concern behavior for each pipeline stage is covered by that
//! stage's own `#[cfg(test)]` module; these exercise stages together.

use chrono::NaiveDate;
use horary_config::Configuration;
use horary_core::{Aspect, AspectInfo, Judgment, Planet, QuestionType, Settings, Sign, SignificatorDescriptor};
use horary_engine::collaborators::{Collaborators, MockEphemeris, MockGeocoder, MockTimezoneResolver};
use horary_engine::pipeline::judgment::compose_judgment;
use horary_engine::pipeline::question::analyze_question;
use horary_engine::pipeline::significator::assign_significators;
use horary_engine::test_support::chart_with_positions;

fn settings_ignoring_void_moon() -> Settings {
    Settings {
        ignore_void_moon: true,
        ..Settings::default()
    }
}

/// Sun in Libra (Saturn's exaltation) and Saturn in Aries (Sun's
/// exaltation), with no aspect between them: mutual-exaltation
/// reception alone perfects the matter.
#[test]
fn mutual_exaltation_with_no_aspect_still_perfects() {
    let mut chart = chart_with_positions(vec![
        (Planet::Sun, Sign::Libra, 10.0),
        (Planet::Saturn, Sign::Aries, 10.0),
    ]);
    chart.ascendant = 15.0;
    let settings = settings_ignoring_void_moon();
    let config = Configuration::defaults();
    let descriptor = SignificatorDescriptor {
        querent: Planet::Sun,
        quesited: Planet::Saturn,
        student: None,
        preparation: None,
        success: None,
        shared_ruler: None,
        natural_significator: None,
        querent_house: 1,
        quesited_house: 7,
        is_transaction: false,
    };
    let outcome = compose_judgment(&chart, &settings, &config, QuestionType::Marriage, &descriptor);
    assert_eq!(outcome.judgment, Judgment::Yes);
    assert!(outcome.confidence >= config.confidence.base_confidence);
    assert!(outcome
        .reasoning
        .iter()
        .any(|line| line.contains("mutual reception by exaltation")));
}

/// Two significators with no aspect and no reception in either direction:
/// the waterfall falls all the way through to the fallback NO.
#[test]
fn no_reception_and_no_aspect_falls_through_to_no() {
    let mut chart = chart_with_positions(vec![
        (Planet::Mars, Sign::Gemini, 10.0),
        (Planet::Venus, Sign::Capricorn, 10.0),
    ]);
    chart.ascendant = 15.0;
    let settings = settings_ignoring_void_moon();
    let config = Configuration::defaults();
    let descriptor = SignificatorDescriptor {
        querent: Planet::Mars,
        quesited: Planet::Venus,
        student: None,
        preparation: None,
        success: None,
        shared_ruler: None,
        natural_significator: None,
        querent_house: 1,
        quesited_house: 7,
        is_transaction: false,
    };
    let outcome = compose_judgment(&chart, &settings, &config, QuestionType::General, &descriptor);
    assert_eq!(outcome.judgment, Judgment::No);
    assert_eq!(outcome.confidence, config.confidence.base_confidence);
    assert!(outcome
        .reasoning
        .iter()
        .any(|line| line.contains("no perfection, translation, collection")));
}

/// A funding question ("will I get the loan?") turns the 1st house over
/// to Mars and the 8th (its natural house) over to Mars as well, under
/// the equal-house default — same-ruler unity, reached through the
/// Question Analyzer and Significator Assigner rather than a
/// hand-built descriptor.
#[test]
fn funding_question_resolves_same_ruler_unity_through_the_full_pipeline() {
    let mut chart = chart_with_positions(Vec::new());
    chart.ascendant = 15.0;
    let settings = settings_ignoring_void_moon();
    let config = Configuration::defaults();

    let shape = analyze_question("Will I get the loan?", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(shape.question_type, QuestionType::Funding);
    assert_eq!(shape.quesited_house, 8);

    let descriptor = assign_significators(&shape, &chart, None);
    assert_eq!(descriptor.querent, Planet::Mars);
    assert_eq!(descriptor.quesited, Planet::Mars);
    assert_eq!(descriptor.shared_ruler, Some(Planet::Mars));

    let outcome = compose_judgment(&chart, &settings, &config, shape.question_type, &descriptor);
    assert_eq!(outcome.judgment, Judgment::Yes);
    assert!(outcome
        .reasoning
        .iter()
        .any(|line| line.contains("same-ruler unity")));
}

/// The radicality gate fires before any significator is resolved: an
/// ascendant at 1° is "too early" and the question can't yet be judged,
/// regardless of how favorable the rest of the chart looks.
#[test]
fn early_ascendant_is_not_radical_even_with_a_perfecting_pair() {
    let mut chart = chart_with_positions(vec![
        (Planet::Mars, Sign::Taurus, 10.0),
        (Planet::Venus, Sign::Aries, 12.0),
    ]);
    chart.ascendant = 1.0;
    let settings = Settings::default();
    let config = Configuration::defaults();
    let descriptor = SignificatorDescriptor {
        querent: Planet::Mars,
        quesited: Planet::Venus,
        student: None,
        preparation: None,
        success: None,
        shared_ruler: None,
        natural_significator: None,
        querent_house: 1,
        quesited_house: 7,
        is_transaction: false,
    };
    let outcome = compose_judgment(&chart, &settings, &config, QuestionType::Marriage, &descriptor);
    assert_eq!(outcome.judgment, Judgment::NotRadical);
    assert!(!outcome.radical);
    assert_eq!(outcome.confidence, 0);
}

/// The full `judge()` entry point, with the ascendant and a single body
/// pinned through `MockEphemeris`, rather than a hand-built chart. Checks
/// the wiring from question text through to a closed-set verdict without
/// predicting the exact verdict, since the rest of the chart still comes
/// from the mock's deterministic-but-unpinned formula.
#[test]
fn end_to_end_judge_call_with_a_pinned_ascendant_and_body() {
    let settings = Settings {
        latitude: Some(38.9072),
        longitude: Some(-77.0369),
        date: Some("2024-06-01".to_string()),
        time: Some("12:00".to_string()),
        timezone: Some("UTC".to_string()),
        ..Settings::default()
    };
    let ephemeris = MockEphemeris::new()
        .with_ascendant(100.0)
        .with_position(Planet::Mercury, 65.0);
    let geocoder = MockGeocoder;
    let tz_resolver = MockTimezoneResolver;
    let collaborators = Collaborators {
        ephemeris: &ephemeris,
        geocoder: &geocoder,
        timezone_resolver: &tz_resolver,
    };

    let result = horary_engine::judge("Will I get the job?", &settings, &collaborators);

    assert!(matches!(
        result.judgment,
        Judgment::Yes | Judgment::No | Judgment::Inconclusive | Judgment::NotRadical
    ));
    assert!(result.chart_data.is_some());
    let analysis = result.question_analysis.expect("question analysis is always populated once the chart builds");
    assert_eq!(analysis.question_type, QuestionType::Career);
    assert!(!result.general_info.planetary_day.is_empty());
    assert!(!result.general_info.planetary_hour.is_empty());
}

fn aspect(body_a: Planet, body_b: Planet, kind: Aspect, applying: bool, degrees_to_exact: f64) -> AspectInfo {
    AspectInfo {
        body_a,
        body_b,
        aspect: kind,
        orb: degrees_to_exact,
        applying,
        degrees_to_exact,
        days_to_exact: if applying { Some(degrees_to_exact) } else { None },
    }
}

/// A marriage question where Venus (L1) and Mars (L7) carry no applying
/// aspect of their own and dignify neither each other: with no perfection,
/// translation, collection, or reception, and the Moon's own next aspect
/// pointed at neither significator, the waterfall falls through to the
/// fallback NO rather than inventing a verdict from incidental testimony.
#[test]
fn marriage_question_with_no_significator_perfection_yields_no() {
    let mut chart = chart_with_positions(vec![
        (Planet::Venus, Sign::Aquarius, 10.0),
        (Planet::Mars, Sign::Gemini, 25.0),
    ]);
    chart.ascendant = 15.0;
    let settings = settings_ignoring_void_moon();
    let config = Configuration::defaults();
    let descriptor = SignificatorDescriptor {
        querent: Planet::Venus,
        quesited: Planet::Mars,
        student: None,
        preparation: None,
        success: None,
        shared_ruler: None,
        natural_significator: None,
        querent_house: 1,
        quesited_house: 7,
        is_transaction: false,
    };
    let outcome = compose_judgment(&chart, &settings, &config, QuestionType::Marriage, &descriptor);
    assert_eq!(outcome.judgment, Judgment::No);
}

/// A void Moon that still applies cleanly to both significators, with
/// non-negative dignity, escapes the ordinary void-of-course denial as a
/// capped, low-confidence YES rather than an automatic NO.
#[test]
fn void_moon_with_clean_translation_yields_capped_yes() {
    let mut chart = chart_with_positions(Vec::new());
    chart.ascendant = 15.0;
    chart.aspects = vec![
        aspect(Planet::Moon, Planet::Mars, Aspect::Sextile, true, 3.0),
        aspect(Planet::Moon, Planet::Venus, Aspect::Trine, true, 5.0),
    ];
    let settings = Settings::default();
    let config = Configuration::defaults();
    let descriptor = SignificatorDescriptor {
        querent: Planet::Mars,
        quesited: Planet::Venus,
        student: None,
        preparation: None,
        success: None,
        shared_ruler: None,
        natural_significator: None,
        querent_house: 1,
        quesited_house: 7,
        is_transaction: false,
    };
    let outcome = compose_judgment(&chart, &settings, &config, QuestionType::General, &descriptor);
    assert_eq!(outcome.judgment, Judgment::Yes);
    assert_eq!(outcome.confidence, config.confidence.void_moon_translation_cap);
    assert!(outcome.reasoning.iter().any(|line| line.contains("cleanly translates")));
}

/// A direct applying trine between the significators would perfect the
/// matter, but Saturn completes a closer applying square to the quesited
/// first: prohibition denies the matter outright and names Saturn.
#[test]
fn prohibition_by_saturn_denies_a_pending_direct_perfection() {
    let mut chart = chart_with_positions(vec![
        (Planet::Mars, Sign::Aries, 15.0),
        (Planet::Venus, Sign::Leo, 15.0),
    ]);
    chart.ascendant = 15.0;
    chart.aspects = vec![
        aspect(Planet::Mars, Planet::Venus, Aspect::Trine, true, 6.0),
        aspect(Planet::Saturn, Planet::Venus, Aspect::Square, true, 2.0),
    ];
    let settings = settings_ignoring_void_moon();
    let config = Configuration::defaults();
    let descriptor = SignificatorDescriptor {
        querent: Planet::Mars,
        quesited: Planet::Venus,
        student: None,
        preparation: None,
        success: None,
        shared_ruler: None,
        natural_significator: None,
        querent_house: 1,
        quesited_house: 7,
        is_transaction: false,
    };
    let outcome = compose_judgment(&chart, &settings, &config, QuestionType::General, &descriptor);
    assert_eq!(outcome.judgment, Judgment::No);
    assert!(outcome.reasoning.iter().any(|line| line.contains("Saturn") && line.contains("prohibited")));
}

/// L7 (Mercury) applies by conjunction to the Sun at 0°30' — combustion, not
/// a favorable perfection, even though the aspect itself is a conjunction
/// between the significators.
#[test]
fn combustion_denial_on_the_significators_own_conjunction_yields_no() {
    let mut chart = chart_with_positions(vec![
        (Planet::Sun, Sign::Aries, 10.0),
        (Planet::Mercury, Sign::Aries, 9.5),
    ]);
    chart.ascendant = 15.0;
    chart.aspects = vec![aspect(Planet::Sun, Planet::Mercury, Aspect::Conjunction, true, 0.5)];
    chart.solar_conditions.insert(
        Planet::Mercury,
        horary_core::SolarCondition {
            kind: horary_core::SolarConditionKind::Combustion,
            distance_from_sun: 0.5,
            exact_cazimi: false,
            traditional_exception: false,
        },
    );
    let settings = settings_ignoring_void_moon();
    let config = Configuration::defaults();
    let descriptor = SignificatorDescriptor {
        querent: Planet::Sun,
        quesited: Planet::Mercury,
        student: None,
        preparation: None,
        success: None,
        shared_ruler: None,
        natural_significator: None,
        querent_house: 1,
        quesited_house: 7,
        is_transaction: false,
    };
    let outcome = compose_judgment(&chart, &settings, &config, QuestionType::General, &descriptor);
    assert_eq!(outcome.judgment, Judgment::No);
    assert!(outcome.reasoning.iter().any(|line| line.contains("combust")));
}
