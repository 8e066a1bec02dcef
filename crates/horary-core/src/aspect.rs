use serde::{Deserialize, Serialize};

/// The five Ptolemaic aspects. No minor aspects are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

pub const ALL_ASPECTS: [Aspect; 5] = [
    Aspect::Conjunction,
    Aspect::Sextile,
    Aspect::Square,
    Aspect::Trine,
    Aspect::Opposition,
];

impl Aspect {
    pub fn degrees(&self) -> f64 {
        match self {
            Aspect::Conjunction => 0.0,
            Aspect::Sextile => 60.0,
            Aspect::Square => 90.0,
            Aspect::Trine => 120.0,
            Aspect::Opposition => 180.0,
        }
    }

    /// Scale applied to the combined moiety of two bodies to get the
    /// effective orb for this aspect.
    pub fn moiety_scale(&self) -> f64 {
        match self {
            Aspect::Conjunction | Aspect::Opposition => 1.0,
            Aspect::Square | Aspect::Trine => 0.85,
            Aspect::Sextile => 0.7,
        }
    }

    /// Conjunction/sextile/trine are base-favorable; square/opposition are
    /// base-unfavorable, before reception is taken into account.
    pub fn is_base_favorable(&self) -> bool {
        matches!(self, Aspect::Conjunction | Aspect::Sextile | Aspect::Trine)
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, Aspect::Square | Aspect::Opposition)
    }
}
