use serde::{Deserialize, Serialize};

/// Orb arithmetic for the Aspect Engine and Solar Condition Analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbSettings {
    /// Window, in degrees, for exact (but not cazimi-exact) cazimi.
    pub cazimi_degrees: f64,
    /// Window, in arcminutes, for the `exact_cazimi` flag.
    pub exact_cazimi_arcminutes: f64,
    pub combustion_degrees: f64,
    pub under_beams_degrees: f64,
    /// Maximum separating orb for a translation-of-light donor leg.
    pub translation_separation_max: f64,
    /// Maximum applying orb for a translation-of-light receiving leg.
    pub translation_application_max: f64,
}

impl Default for OrbSettings {
    fn default() -> Self {
        OrbSettings {
            cazimi_degrees: 0.2833,
            exact_cazimi_arcminutes: 3.0,
            combustion_degrees: 8.5,
            under_beams_degrees: 15.0,
            translation_separation_max: 10.0,
            translation_application_max: 15.0,
        }
    }
}

/// Weights composed by the Dignity Scorer. All additive; signs encode
/// direction so the scorer is a pure summation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DignityWeights {
    pub domicile: i32,
    pub exaltation: i32,
    pub triplicity: i32,
    pub detriment: i32,
    pub fall: i32,

    pub house_joy: i32,
    pub angular: i32,
    pub succedent: i32,
    pub cadent: i32,
    /// A body within this many degrees of an angular cusp counts as angular
    /// regardless of its assigned house.
    pub angular_cusp_orb_degrees: f64,

    pub fast_speed_bonus: i32,
    pub near_stationary_penalty: i32,
    pub retrograde_penalty: i32,
    /// A body's speed below this fraction of its mean daily motion counts
    /// as "near-stationary".
    pub stationary_speed_fraction: f64,

    pub hayz_bonus: i32,
    pub contrariety_penalty: i32,

    pub cazimi_bonus: i32,
    pub exact_cazimi_bonus: i32,
    pub combustion_penalty: i32,
    pub under_beams_penalty: i32,

    /// A significator below this dignity score counts as "weak" for the
    /// Perfection Detector's cadent-or-weak requirement.
    pub cadent_weak_dignity_threshold: i32,
    /// A quesited cadent ruler below this dignity score counts as
    /// "weakly dignified" for the lost-object domain denial.
    pub lost_object_weak_dignity_threshold: i32,
}

impl Default for DignityWeights {
    fn default() -> Self {
        DignityWeights {
            domicile: 5,
            exaltation: 4,
            triplicity: 3,
            detriment: -5,
            fall: -4,
            house_joy: 2,
            angular: 4,
            succedent: 1,
            cadent: -3,
            angular_cusp_orb_degrees: 5.0,
            fast_speed_bonus: 2,
            near_stationary_penalty: -2,
            retrograde_penalty: -4,
            stationary_speed_fraction: 0.1,
            hayz_bonus: 2,
            contrariety_penalty: -2,
            cazimi_bonus: 8,
            exact_cazimi_bonus: 12,
            combustion_penalty: -6,
            under_beams_penalty: -3,
            cadent_weak_dignity_threshold: -5,
            lost_object_weak_dignity_threshold: -5,
        }
    }
}

/// Confidence composition bands and caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceSettings {
    pub base_confidence: u8,

    pub mutual_rulership_confidence: u8,
    pub mutual_exaltation_bonus: u8,
    pub reception_bonus: u8,

    pub translation_bonus: u8,
    pub collection_bonus: u8,
    /// Penalty applied to translation/collection confidence when the
    /// third body carrying the light is itself combusted.
    pub carrier_combustion_penalty: u8,
    /// Penalty applied when a hard aspect's unfavorable default is
    /// softened by reception rather than reversed outright.
    pub hard_aspect_reception_penalty: u8,
    /// Penalty applied when the collecting body is itself weakly dignified.
    pub weak_collector_penalty: u8,

    pub prohibition_penalty_saturn: u8,
    pub prohibition_penalty_mars: u8,
    pub prohibition_penalty_other: u8,
    /// Softening applied to a prohibition penalty when the prohibitor
    /// receives the prohibited significator.
    pub prohibition_reception_softening: u8,

    /// Confidence penalty bands keyed by combustion orb, tightest first:
    /// `[<1°, <2°, <5°, else]`.
    pub combustion_penalty_bands: [u8; 4],

    pub same_ruler_unity_base_confidence: u8,
    /// Policy decision: same-ruler unity defaults to
    /// YES unless an explicit prohibition is found.
    pub same_ruler_unity_default_yes: bool,

    pub void_moon_denial_confidence: u8,
    pub void_moon_translation_cap: u8,

    pub pregnancy_exception_confidence: u8,

    /// Confidence penalty forced when two or more severe impediments are
    /// found on the significators, regardless of perfection.
    pub impediment_denial_penalty: u8,
    /// Per-reason confidence penalty accumulated by a domain-specific
    /// denial (lost-object cadency/combustion/void/Saturn/Mars checks).
    pub domain_denial_penalty: u8,
    /// Confidence penalty forced when multiple travel-denial factors
    /// (Jupiter quesited) accumulate.
    pub travel_denial_penalty: u8,

    /// Same-ruler unity: penalty when the shared ruler is weakly dignified.
    pub same_ruler_weak_dignity_penalty: u8,
    /// Same-ruler unity: penalty when the shared ruler is retrograde.
    pub same_ruler_retrograde_penalty: u8,
    /// Same-ruler unity: confidence when the shared ruler is severely
    /// combust, overwhelming the unity into a NO.
    pub same_ruler_severe_combustion_confidence: u8,

    /// Confidence swing applied by the Moon's next applying aspect to a
    /// significator, favorable or unfavorable.
    pub moon_testimony_bonus: u8,
    /// Mild confidence bonus when the Moon applies to a benefic as
    /// secondary testimony.
    pub moon_benefic_support_bonus: u8,

    /// A YES below this threshold becomes NO.
    pub yes_floor: u8,
    pub yes_floor_min: u8,
    /// `[low, high]` band that becomes INCONCLUSIVE instead of NO/YES.
    pub inconclusive_band: [u8; 2],
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        ConfidenceSettings {
            base_confidence: 50,
            mutual_rulership_confidence: 90,
            mutual_exaltation_bonus: 15,
            reception_bonus: 10,
            translation_bonus: 10,
            collection_bonus: 8,
            carrier_combustion_penalty: 10,
            hard_aspect_reception_penalty: 10,
            weak_collector_penalty: 10,
            prohibition_penalty_saturn: 40,
            prohibition_penalty_mars: 25,
            prohibition_penalty_other: 15,
            prohibition_reception_softening: 10,
            combustion_penalty_bands: [35, 25, 15, 8],
            same_ruler_unity_base_confidence: 65,
            same_ruler_unity_default_yes: true,
            void_moon_denial_confidence: 75,
            void_moon_translation_cap: 30,
            pregnancy_exception_confidence: 60,
            impediment_denial_penalty: 30,
            domain_denial_penalty: 10,
            travel_denial_penalty: 25,
            same_ruler_weak_dignity_penalty: 10,
            same_ruler_retrograde_penalty: 10,
            same_ruler_severe_combustion_confidence: 70,
            moon_testimony_bonus: 10,
            moon_benefic_support_bonus: 5,
            yes_floor: 30,
            yes_floor_min: 20,
            inconclusive_band: [30, 49],
        }
    }
}

/// Void-of-course method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoidMethod {
    BySign,
    ByOrb,
    Lilly,
}

impl Default for VoidMethod {
    fn default() -> Self {
        VoidMethod::BySign
    }
}

/// Moon Story configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MoonSettings {
    pub void_method: VoidMethod,
    /// Signs in which void-of-course carries a traditional dispensation.
    pub void_exception_signs: Vec<String>,
    /// Only consulted under `VoidMethod::ByOrb`: orb beyond which the
    /// Moon is considered to be making no more aspects.
    pub void_orb_degrees: f64,
}

impl Default for MoonSettings {
    fn default() -> Self {
        MoonSettings {
            void_method: VoidMethod::BySign,
            void_exception_signs: vec!["cancer".into(), "sagittarius".into(), "taurus".into()],
            void_orb_degrees: 3.0,
        }
    }
}

/// Radicality Gate thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadicalitySettings {
    pub too_early_degrees: f64,
    pub too_late_degrees: f64,
    /// Whether Saturn in the 7th disqualifies a chart even without the
    /// caller's per-request `ignore_saturn_7th` override. Defaults to
    /// `false`: the disqualifier holds unless the caller explicitly
    /// overrides it.
    pub saturn_7th_bypassable: bool,
    pub check_via_combusta: bool,
    /// Via Combusta runs from this degree of Libra...
    pub via_combusta_start_degree: f64,
    /// ...through this degree of Scorpio.
    pub via_combusta_end_degree: f64,
}

impl Default for RadicalitySettings {
    fn default() -> Self {
        RadicalitySettings {
            too_early_degrees: 3.0,
            too_late_degrees: 27.0,
            saturn_7th_bypassable: false,
            check_via_combusta: true,
            via_combusta_start_degree: 15.0,
            via_combusta_end_degree: 15.0,
        }
    }
}

/// Motion buckets used by the Dignity Scorer and Aspect Engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrogradeSettings {
    /// Forward-projection increment, in days, used to test "is this orb
    /// shrinking" for the applying/separating test.
    pub projection_increment_days: f64,
    /// Dignity penalty applied per severe impediment when composing
    /// denial strength; kept separate from `DignityWeights` so it
    /// can be tuned without perturbing the scorer.
    pub severe_dignity_threshold: i32,
    /// Combustion orb, in degrees, counted as "extreme" on its own —
    /// severe enough to impede regardless of dignity.
    pub extreme_combustion_degrees: f64,
    /// Wider combustion orb, in degrees, counted as severe only when
    /// paired with a weak dignity score (below `severe_dignity_threshold`).
    pub weak_combust_degrees: f64,
}

impl Default for RetrogradeSettings {
    fn default() -> Self {
        RetrogradeSettings {
            projection_increment_days: 0.1,
            severe_dignity_threshold: -4,
            extreme_combustion_degrees: 1.0,
            weak_combust_degrees: 3.0,
        }
    }
}

/// ETA-to-human-string buckets for the Moon Story.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub within_hours_max_days: f64,
    pub within_day_max_days: f64,
    pub within_days_max_days: f64,
    pub within_weeks_max_days: f64,
    pub within_months_max_days: f64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        TimingSettings {
            within_hours_max_days: 0.25,
            within_day_max_days: 1.0,
            within_days_max_days: 7.0,
            within_weeks_max_days: 30.0,
            within_months_max_days: 365.0,
        }
    }
}
