use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::planet::Planet;

/// The closed question-type taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    LostObject,
    Marriage,
    Pregnancy,
    Children,
    Travel,
    Gambling,
    Funding,
    Money,
    Career,
    Health,
    Lawsuit,
    Relationship,
    Education,
    Parent,
    Sibling,
    FriendEnemy,
    Property,
    Death,
    Spiritual,
    General,
}

/// Closed timeframe taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeframeKind {
    Today,
    ThisWeek,
    ThisMonth,
    NextMonth,
    ThisYear,
    SpecificMonth,
    Soon,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeframe {
    pub kind: TimeframeKind,
    /// Absolute end-date bound, where determinate.
    pub end_date: Option<NaiveDate>,
}

/// Roles attached to significators beyond plain querent/quesited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignificatorDescriptor {
    pub querent: Planet,
    pub quesited: Planet,
    /// Third-person education turning: {teacher=L1, student=L7, preparation=L9, success=L10}.
    pub student: Option<Planet>,
    pub preparation: Option<Planet>,
    pub success: Option<Planet>,
    /// Attached when the first and quesited houses share a ruler.
    pub shared_ruler: Option<Planet>,
    /// Natural significator by transaction category.
    pub natural_significator: Option<Planet>,
    pub querent_house: u8,
    pub quesited_house: u8,
    pub is_transaction: bool,
}

impl SignificatorDescriptor {
    pub fn is_same_ruler_unity(&self) -> bool {
        self.shared_ruler.is_some()
    }
}

/// Output of the Question Analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnalysis {
    pub question_type: QuestionType,
    /// Houses relevant to this question, in derivation order; index 0 is house 1.
    pub relevant_houses: Vec<u8>,
    pub significators: SignificatorDescriptor,
    pub third_person: bool,
    pub timeframe: Option<Timeframe>,
}
