//! House-cusp bookkeeping shared by the Chart Builder and test fixtures.

use horary_core::{geometry::signed_arc, Planet, Sign};

/// Which of the twelve houses (1-indexed) a longitude falls in, given
/// ordered cusps starting at house 1.
pub fn house_for_longitude(cusps: &[f64; 12], longitude: f64) -> u8 {
    for house in 1..=12u8 {
        let start = cusps[(house - 1) as usize];
        let end = cusps[(house % 12) as usize];
        let span = if end > start { end - start } else { 360.0 - start + end };
        let offset = if longitude >= start {
            longitude - start
        } else {
            360.0 - start + longitude
        };
        if offset < span {
            return house;
        }
    }
    // Fallback for floating point edge cases exactly on the 12th cusp.
    12
}

/// Equal-house cusps starting from the ascendant, used by the mock
/// ephemeris and by tests that don't need Regiomontanus precision.
pub fn equal_house_cusps(ascendant: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (ascendant + i as f64 * 30.0).rem_euclid(360.0);
    }
    cusps
}

/// House rulers derived from whichever sign each cusp falls in.
pub fn house_rulers_from_cusps(cusps: &[f64; 12]) -> std::collections::HashMap<u8, Planet> {
    let mut map = std::collections::HashMap::new();
    for (i, cusp) in cusps.iter().enumerate() {
        let (sign, _) = Sign::from_longitude(*cusp);
        map.insert((i + 1) as u8, sign.ruler());
    }
    map
}

/// Degrees from the given longitude to the nearest house cusp, signed so a
/// caller can test the "5° rule" regardless of the cusp's index.
pub fn degrees_to_nearest_cusp(cusps: &[f64; 12], longitude: f64) -> f64 {
    cusps
        .iter()
        .map(|cusp| signed_arc(*cusp, longitude).abs())
        .fold(f64::MAX, f64::min)
}

/// Degrees from the given longitude to the nearest *angular* cusp (1/4/7/10
/// — indices 0/3/6/9), used by the Dignity Scorer's 5° rule.
pub fn degrees_to_nearest_angular_cusp(cusps: &[f64; 12], longitude: f64) -> f64 {
    [cusps[0], cusps[3], cusps[6], cusps[9]]
        .iter()
        .map(|cusp| signed_arc(*cusp, longitude).abs())
        .fold(f64::MAX, f64::min)
}
