use serde::{Deserialize, Serialize};

use crate::question::QuestionAnalysis;

/// The closed verdict set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Judgment {
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
    #[serde(rename = "INCONCLUSIVE")]
    Inconclusive,
    #[serde(rename = "NOT RADICAL")]
    NotRadical,
    #[serde(rename = "CANNOT JUDGE")]
    CannotJudge,
    #[serde(rename = "LOCATION_ERROR")]
    LocationError,
    #[serde(rename = "ERROR")]
    Error,
}

/// Planetary day/hour and Moon phase/mansion, surfaced regardless of verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralInfo {
    pub planetary_day: String,
    pub planetary_hour: String,
    pub moon_phase: String,
    pub moon_mansion: String,
}

/// Radicality and void-of-course status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Considerations {
    pub radical: bool,
    pub void_of_course: bool,
    pub notes: Vec<String>,
}

/// How the chart's timezone was resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimezoneInfo {
    pub timezone: String,
    pub utc_offset_minutes: i32,
    pub resolved_via: String,
}

/// The structured output of `judge()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgmentResult {
    pub judgment: Judgment,
    pub confidence: u8,
    pub reasoning: Vec<String>,
    pub timing: Option<String>,
    pub chart_data: Option<serde_json::Value>,
    pub question_analysis: Option<QuestionAnalysis>,
    pub traditional_factors: Vec<String>,
    pub solar_factors: Vec<String>,
    pub general_info: GeneralInfo,
    pub considerations: Considerations,
    pub timezone_info: Option<TimezoneInfo>,
}

impl JudgmentResult {
    pub fn error(message: impl Into<String>) -> Self {
        JudgmentResult {
            judgment: Judgment::Error,
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

    pub fn location_error(message: impl Into<String>) -> Self {
        JudgmentResult {
            judgment: Judgment::LocationError,
            ..JudgmentResult::error(message)
        }
    }
}
