use serde::{Deserialize, Serialize};

use crate::planet::Planet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// 0-indexed ordinal, Aries = 0.
    pub fn index(&self) -> u8 {
        match self {
            Sign::Aries => 0,
            Sign::Taurus => 1,
            Sign::Gemini => 2,
            Sign::Cancer => 3,
            Sign::Leo => 4,
            Sign::Virgo => 5,
            Sign::Libra => 6,
            Sign::Scorpio => 7,
            Sign::Sagittarius => 8,
            Sign::Capricorn => 9,
            Sign::Aquarius => 10,
            Sign::Pisces => 11,
        }
    }

    pub fn from_index(index: u8) -> Sign {
        ALL_SIGNS[(index % 12) as usize]
    }

    /// Ecliptic longitude where this sign begins, 0..360.
    pub fn start_degree(&self) -> f64 {
        self.index() as f64 * 30.0
    }

    /// Derive the sign (and degree within it) from an absolute longitude.
    pub fn from_longitude(longitude: f64) -> (Sign, f64) {
        let normalized = longitude.rem_euclid(360.0);
        let index = (normalized / 30.0).floor() as u8;
        (Sign::from_index(index), normalized - index as f64 * 30.0)
    }

    pub fn opposite(&self) -> Sign {
        Sign::from_index((self.index() + 6) % 12)
    }

    /// Domicile ruler of this sign.
    pub fn ruler(&self) -> Planet {
        match self {
            Sign::Aries | Sign::Scorpio => Planet::Mars,
            Sign::Taurus | Sign::Libra => Planet::Venus,
            Sign::Gemini | Sign::Virgo => Planet::Mercury,
            Sign::Cancer => Planet::Moon,
            Sign::Leo => Planet::Sun,
            Sign::Sagittarius | Sign::Pisces => Planet::Jupiter,
            Sign::Capricorn | Sign::Aquarius => Planet::Saturn,
        }
    }

    /// Triplicity (elemental) ruler by sect, per Lilly's table.
    pub fn triplicity_ruler(&self, is_day_chart: bool) -> Planet {
        use Sign::*;
        match self {
            Aries | Leo | Sagittarius => {
                if is_day_chart {
                    Planet::Sun
                } else {
                    Planet::Jupiter
                }
            }
            Taurus | Virgo | Capricorn => {
                if is_day_chart {
                    Planet::Venus
                } else {
                    Planet::Moon
                }
            }
            Gemini | Libra | Aquarius => {
                if is_day_chart {
                    Planet::Saturn
                } else {
                    Planet::Mercury
                }
            }
            Cancer | Scorpio | Pisces => {
                if is_day_chart {
                    Planet::Venus
                } else {
                    Planet::Mars
                }
            }
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Sign::Taurus | Sign::Leo | Sign::Scorpio | Sign::Aquarius)
    }
}
