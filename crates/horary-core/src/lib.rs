//! Shared types and errors for the horary astrology judgment engine.
//!
//! This crate has no pipeline logic: it defines the data model so that
//! `horary-config` and `horary-engine` can depend on a common vocabulary
//! without a cycle.

pub mod aspect;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod planet;
pub mod question;
pub mod result;
pub mod settings;
pub mod sign;

pub use aspect::{Aspect, ALL_ASPECTS};
pub use chart::{AspectInfo, HoraryChart, LunarAspect, PlanetPosition, SolarCondition, SolarConditionKind};
pub use error::HoraryError;
pub use planet::{ChartPoint, Planet, ALL_PLANETS};
pub use question::{
    QuestionAnalysis, QuestionType, SignificatorDescriptor, Timeframe, TimeframeKind,
};
pub use result::{Considerations, GeneralInfo, Judgment, JudgmentResult, TimezoneInfo};
pub use settings::Settings;
pub use sign::{Sign, ALL_SIGNS};
