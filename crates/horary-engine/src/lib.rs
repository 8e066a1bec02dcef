//! Judgment engine for traditional horary astrology: resolves a chart for
//! the moment a question is asked, then runs it through the judgment
//! pipeline to a verdict.
//!
//! [`judge`] is the single external entry point; everything else in this
//! crate exists to support it or is exercised directly by its own tests.

pub mod chart_builder;
pub mod collaborators;
pub mod datetime;
pub mod houses;
pub mod logging;
pub mod pipeline;
pub mod planetary_hours;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod test_support;

use chrono::Datelike;
use horary_config::Configuration;
use horary_core::{
    Considerations, GeneralInfo, HoraryError, JudgmentResult, Planet, QuestionAnalysis, Settings,
    TimezoneInfo,
};

use crate::collaborators::Collaborators;

fn solar_factor(line: &str) -> bool {
    let lower = line.to_lowercase();
    ["combust", "cazimi", "under beams", "under-beams", "the sun"]
        .iter()
        .any(|needle| lower.contains(needle))
}

fn cannot_judge(message: impl Into<String>) -> JudgmentResult {
    JudgmentResult {
        judgment: horary_core::Judgment::CannotJudge,
        confidence: 0,
        reasoning: vec![message.into()],
        timing: None,
        chart_data: None,
        question_analysis: None,
        traditional_factors: Vec::new(),
        solar_factors: Vec::new(),
        general_info: GeneralInfo::default(),
        considerations: Considerations::default(),
        timezone_info: None,
    }
}

fn result_for_error(err: HoraryError) -> JudgmentResult {
    match err {
        HoraryError::LocationError(msg) => JudgmentResult::location_error(msg),
        other => JudgmentResult::error(other.to_string()),
    }
}

/// Judge a horary question end to end: resolve the moment and place,
/// build the chart, validate radicality, classify the question, assign
/// significators, and run the judgment waterfall.
pub fn judge(question: &str, settings: &Settings, collaborators: &Collaborators) -> JudgmentResult {
    let config = match Configuration::load() {
        Ok(config) => config,
        Err(err) => return result_for_error(err),
    };

    if let Some(houses) = &settings.manual_houses {
        if houses.iter().any(|house| *house < 1 || *house > 12) {
            return cannot_judge(format!(
                "manual_houses entries must be in 1..=12, got {houses:?}"
            ));
        }
    }

    let moment = match chart_builder::resolve_moment(settings, collaborators) {
        Ok(moment) => moment,
        Err(err) => return result_for_error(err),
    };

    let chart = match chart_builder::build_chart(&moment, collaborators, &config) {
        Ok(chart) => chart,
        Err(err) => return result_for_error(err),
    };

    let asked_on = moment.local_datetime.date();
    let shape = pipeline::question::analyze_question(question, asked_on);
    let descriptor = pipeline::significator::assign_significators(
        &shape,
        &chart,
        settings.manual_houses.as_deref(),
    );

    let outcome = pipeline::judgment::compose_judgment(
        &chart,
        settings,
        &config,
        shape.question_type,
        &descriptor,
    );

    let mut traditional_factors = Vec::new();
    let mut solar_factors = Vec::new();
    for line in &outcome.reasoning {
        if solar_factor(line) {
            solar_factors.push(line.clone());
        } else {
            traditional_factors.push(line.clone());
        }
    }

    let sun_longitude = chart.position(Planet::Sun).longitude;
    let moon_longitude = chart.position(Planet::Moon).longitude;
    let general_info = GeneralInfo {
        planetary_day: planetary_hours::planetary_day(moment.local_datetime.date().weekday())
            .name()
            .to_string(),
        planetary_hour: planetary_hours::planetary_hour(moment.local_datetime).name().to_string(),
        moon_phase: pipeline::moon::moon_phase(sun_longitude, moon_longitude).to_string(),
        moon_mansion: pipeline::moon::moon_mansion(moon_longitude).to_string(),
    };

    let considerations = Considerations {
        radical: outcome.radical,
        void_of_course: outcome.void_of_course,
        notes: outcome.reasoning.clone(),
    };

    let utc_offset_minutes = (moment.local_datetime - moment.utc_datetime.naive_utc()).num_minutes() as i32;
    let timezone_info = Some(TimezoneInfo {
        timezone: moment.timezone.clone(),
        utc_offset_minutes,
        resolved_via: format!("{:?}", moment.resolved_via),
    });

    let question_analysis = Some(QuestionAnalysis {
        question_type: shape.question_type,
        relevant_houses: shape.relevant_houses.clone(),
        significators: descriptor,
        third_person: shape.third_person,
        timeframe: shape.timeframe.clone(),
    });

    JudgmentResult {
        judgment: outcome.judgment,
        confidence: outcome.confidence,
        reasoning: outcome.reasoning,
        timing: outcome.timing,
        chart_data: serde_json::to_value(&chart).ok(),
        question_analysis,
        traditional_factors,
        solar_factors,
        general_info,
        considerations,
        timezone_info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockEphemeris, MockGeocoder, MockTimezoneResolver};
    use horary_core::Judgment;

    fn mock_collaborators<'a>(
        ephemeris: &'a MockEphemeris,
        geocoder: &'a MockGeocoder,
        tz_resolver: &'a MockTimezoneResolver,
    ) -> Collaborators<'a> {
        Collaborators {
            ephemeris,
            geocoder,
            timezone_resolver: tz_resolver,
        }
    }

    #[test]
    fn end_to_end_judgment_produces_a_closed_set_verdict() {
        let settings = Settings {
            latitude: Some(38.9072),
            longitude: Some(-77.0369),
            date: Some("2004-02-03".to_string()),
            time: Some("22:00".to_string()),
            timezone: Some("America/New_York".to_string()),
            ..Settings::default()
        };
        let ephemeris = MockEphemeris::new();
        let geocoder = MockGeocoder;
        let tz_resolver = MockTimezoneResolver;
        let collaborators = mock_collaborators(&ephemeris, &geocoder, &tz_resolver);
        let result = judge("Will he marry me?", &settings, &collaborators);
        assert!(matches!(
            result.judgment,
            Judgment::Yes | Judgment::No | Judgment::Inconclusive | Judgment::NotRadical
        ));
        assert!(result.chart_data.is_some());
        assert!(result.timezone_info.is_some());
    }

    #[test]
    fn out_of_range_manual_house_yields_cannot_judge() {
        let settings = Settings {
            latitude: Some(0.0),
            longitude: Some(0.0),
            date: Some("2024-01-01".to_string()),
            time: Some("12:00".to_string()),
            timezone: Some("UTC".to_string()),
            manual_houses: Some(vec![0, 20]),
            ..Settings::default()
        };
        let ephemeris = MockEphemeris::new();
        let geocoder = MockGeocoder;
        let tz_resolver = MockTimezoneResolver;
        let collaborators = mock_collaborators(&ephemeris, &geocoder, &tz_resolver);
        let result = judge("Will I get the job?", &settings, &collaborators);
        assert_eq!(result.judgment, Judgment::CannotJudge);
    }

    #[test]
    fn empty_location_yields_location_error() {
        let settings = Settings {
            location: Some(String::new()),
            date: Some("2024-01-01".to_string()),
            time: Some("12:00".to_string()),
            ..Settings::default()
        };
        let ephemeris = MockEphemeris::new();
        let geocoder = MockGeocoder;
        let tz_resolver = MockTimezoneResolver;
        let collaborators = mock_collaborators(&ephemeris, &geocoder, &tz_resolver);
        let result = judge("Will I get the job?", &settings, &collaborators);
        assert_eq!(result.judgment, Judgment::LocationError);
    }
}
