use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aspect::Aspect;
use crate::planet::Planet;
use crate::sign::Sign;

/// Per-body, per-chart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub planet: Planet,
    /// Ecliptic longitude, 0..360.
    pub longitude: f64,
    pub latitude: f64,
    /// Signed degrees/day; negative means retrograde.
    pub daily_motion: f64,
    pub sign: Sign,
    pub house: u8,
    pub dignity_score: i32,
}

impl PlanetPosition {
    pub fn is_retrograde(&self) -> bool {
        self.daily_motion < 0.0
    }

    pub fn degree_in_sign(&self) -> f64 {
        self.longitude - self.sign.start_degree()
    }

    /// Degrees remaining before this body exits its current sign, in its
    /// current direction of motion. `None` if the body is stationary.
    pub fn degrees_to_sign_exit(&self) -> Option<f64> {
        if self.daily_motion == 0.0 {
            return None;
        }
        if self.daily_motion > 0.0 {
            Some(30.0 - self.degree_in_sign())
        } else {
            Some(self.degree_in_sign())
        }
    }

    /// Days until this body exits its current sign; `None` if stationary.
    pub fn days_to_sign_exit(&self) -> Option<f64> {
        self.degrees_to_sign_exit()
            .map(|deg| deg / self.daily_motion.abs())
    }

    pub fn is_angular(&self) -> bool {
        matches!(self.house, 1 | 4 | 7 | 10)
    }

    pub fn is_succedent(&self) -> bool {
        matches!(self.house, 2 | 5 | 8 | 11)
    }

    pub fn is_cadent(&self) -> bool {
        matches!(self.house, 3 | 6 | 9 | 12)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarConditionKind {
    Cazimi,
    Combustion,
    UnderBeams,
    Free,
}

/// A body's relation to the Sun.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarCondition {
    pub kind: SolarConditionKind,
    /// Angular distance from the Sun, in degrees.
    pub distance_from_sun: f64,
    /// Within arcminutes of exact (configured cazimi window).
    pub exact_cazimi: bool,
    /// Mercury/Venus visibility exception applied.
    pub traditional_exception: bool,
}

/// A current applying/separating aspect between two bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectInfo {
    pub body_a: Planet,
    pub body_b: Planet,
    pub aspect: Aspect,
    /// Orb from exact, in degrees (unsigned distance).
    pub orb: f64,
    pub applying: bool,
    /// Degrees remaining until the aspect perfects (0 if exact now).
    pub degrees_to_exact: f64,
    /// Approximate days until perfection, if applying.
    pub days_to_exact: Option<f64>,
}

impl AspectInfo {
    pub fn involves(&self, planet: Planet) -> bool {
        self.body_a == planet || self.body_b == planet
    }

    pub fn other(&self, planet: Planet) -> Option<Planet> {
        if self.body_a == planet {
            Some(self.body_b)
        } else if self.body_b == planet {
            Some(self.body_a)
        } else {
            None
        }
    }
}

/// A Moon-specific aspect projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LunarAspect {
    pub planet: Planet,
    pub aspect: Aspect,
    pub orb: f64,
    pub degrees_difference: f64,
    pub eta_days: f64,
    pub eta_human: String,
    pub applying: bool,
}

/// The immutable, fully-resolved chart for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoraryChart {
    pub local_datetime: NaiveDateTime,
    pub utc_datetime: DateTime<Utc>,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub julian_day: f64,
    pub ascendant: f64,
    pub midheaven: f64,
    /// Twelve cusps in house order, each 0..360.
    pub house_cusps: [f64; 12],
    pub house_rulers: HashMap<u8, Planet>,
    pub positions: HashMap<Planet, PlanetPosition>,
    pub aspects: Vec<AspectInfo>,
    pub solar_conditions: HashMap<Planet, SolarCondition>,
    pub moon_last_aspect: Option<LunarAspect>,
    pub moon_next_aspect: Option<LunarAspect>,
}

impl HoraryChart {
    pub fn position(&self, planet: Planet) -> &PlanetPosition {
        self.positions
            .get(&planet)
            .expect("chart is built with all seven planets")
    }

    pub fn solar_condition(&self, planet: Planet) -> &SolarCondition {
        self.solar_conditions
            .get(&planet)
            .expect("chart is built with all seven planets")
    }

    pub fn ruler_of_house(&self, house: u8) -> Planet {
        *self
            .house_rulers
            .get(&house)
            .expect("house rulers cover all twelve houses")
    }

    /// Day chart iff the Sun is below the horizon, i.e. in houses 7-12.
    pub fn is_day_chart(&self) -> bool {
        matches!(self.position(Planet::Sun).house, 7..=12)
    }

    pub fn aspect_between(&self, a: Planet, b: Planet) -> Option<&AspectInfo> {
        self.aspects
            .iter()
            .find(|info| (info.body_a == a && info.body_b == b) || (info.body_a == b && info.body_b == a))
    }

    pub fn aspects_of(&self, planet: Planet) -> impl Iterator<Item = &AspectInfo> {
        self.aspects.iter().filter(move |a| a.involves(planet))
    }
}
