//! Trait seams for the three blocking collaborators: the
//! ephemeris oracle, the geocoder, and the timezone resolver. The judgment
//! pipeline itself never depends on a concrete implementation of any of
//! these — only on the trait — so it stays synchronous and testable
//! without network access or a bundled ephemeris data file.

use std::collections::HashMap;

use horary_core::{HoraryError, Planet};

/// Raw per-body output from an ephemeris query, before the Chart Builder
/// derives sign/house/dignity from it.
#[derive(Debug, Clone, Copy)]
pub struct RawPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub daily_motion: f64,
}

/// House cusps and chart angles for one moment and place, using the
/// Regiomontanus system.
#[derive(Debug, Clone, Copy)]
pub struct HouseData {
    pub ascendant: f64,
    pub midheaven: f64,
    pub cusps: [f64; 12],
}

/// The ephemeris oracle: Julian Day in, planetary longitudes/latitudes/
/// daily motions and house cusps out.
pub trait Ephemeris {
    fn positions(&self, julian_day: f64) -> HashMap<Planet, Result<RawPosition, HoraryError>>;
    fn houses(&self, julian_day: f64, latitude: f64, longitude: f64) -> Result<HouseData, HoraryError>;
}

#[derive(Debug, Clone)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub canonical_name: String,
}

/// String → coordinates, or a location error.
pub trait Geocoder {
    fn geocode(&self, location: &str) -> Result<GeocodeResult, HoraryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    Primary,
    RegionalFallback,
    UtcDefault,
}

#[derive(Debug, Clone)]
pub struct TimezoneResolution {
    pub timezone: String,
    pub utc_offset_minutes: i32,
    pub resolved_via: ResolvedVia,
}

/// Coordinates → IANA zone, with documented rectangular fallbacks.
pub trait TimezoneResolver {
    fn resolve(&self, latitude: f64, longitude: f64) -> TimezoneResolution;
}

/// A documented rectangular fallback region, consulted in order when the
/// primary timezone lookup fails or returns an implausible result.
pub struct RegionBox {
    pub name: &'static str,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub timezone: &'static str,
    pub utc_offset_minutes: i32,
}

pub const REGION_BOXES: &[RegionBox] = &[
    RegionBox {
        name: "continental US",
        min_lat: 24.5,
        max_lat: 49.5,
        min_lon: -125.0,
        max_lon: -66.9,
        timezone: "America/Chicago",
        utc_offset_minutes: -6 * 60,
    },
    RegionBox {
        name: "western Europe",
        min_lat: 36.0,
        max_lat: 60.0,
        min_lon: -10.0,
        max_lon: 15.0,
        timezone: "Europe/Paris",
        utc_offset_minutes: 60,
    },
    RegionBox {
        name: "India",
        min_lat: 8.0,
        max_lat: 35.0,
        min_lon: 68.0,
        max_lon: 97.0,
        timezone: "Asia/Kolkata",
        utc_offset_minutes: 330,
    },
];

/// Deterministic in-memory ephemeris used by tests. Produces plausible,
/// reproducible longitudes/speeds derived from the Julian Day rather than
/// real astronomical positions — the real oracle is explicitly out of
/// scope. Individual bodies and the ascendant can be pinned with
/// [`MockEphemeris::with_position`]/[`MockEphemeris::with_ascendant`] for
/// scenario tests that need a specific dignity or aspect configuration.
pub struct MockEphemeris {
    pub failing_bodies: Vec<Planet>,
    pub position_overrides: HashMap<Planet, RawPosition>,
    pub ascendant_override: Option<f64>,
}

impl MockEphemeris {
    pub fn new() -> Self {
        MockEphemeris {
            failing_bodies: Vec::new(),
            position_overrides: HashMap::new(),
            ascendant_override: None,
        }
    }

    pub fn with_failure(mut self, planet: Planet) -> Self {
        self.failing_bodies.push(planet);
        self
    }

    /// Pin a body to an exact longitude, keeping its mean daily motion
    /// unless paired with [`MockEphemeris::with_motion`].
    pub fn with_position(mut self, planet: Planet, longitude: f64) -> Self {
        self.position_overrides.insert(
            planet,
            RawPosition {
                longitude: longitude.rem_euclid(360.0),
                latitude: 0.0,
                daily_motion: planet.mean_daily_motion(),
            },
        );
        self
    }

    /// Pin a body to an exact longitude and daily motion (negative for
    /// retrograde).
    pub fn with_motion(mut self, planet: Planet, longitude: f64, daily_motion: f64) -> Self {
        self.position_overrides.insert(
            planet,
            RawPosition {
                longitude: longitude.rem_euclid(360.0),
                latitude: 0.0,
                daily_motion,
            },
        );
        self
    }

    /// Pin the ascendant (and, through it, all house cusps) to an exact
    /// degree instead of deriving it from the Julian Day.
    pub fn with_ascendant(mut self, ascendant: f64) -> Self {
        self.ascendant_override = Some(ascendant.rem_euclid(360.0));
        self
    }
}

impl Default for MockEphemeris {
    fn default() -> Self {
        MockEphemeris::new()
    }
}

impl Ephemeris for MockEphemeris {
    fn positions(&self, julian_day: f64) -> HashMap<Planet, Result<RawPosition, HoraryError>> {
        let mut out = HashMap::new();
        for planet in horary_core::ALL_PLANETS {
            if self.failing_bodies.contains(&planet) {
                out.insert(
                    planet,
                    Err(HoraryError::calculation(planet.name(), "mock ephemeris failure")),
                );
                continue;
            }
            if let Some(pinned) = self.position_overrides.get(&planet) {
                out.insert(planet, Ok(*pinned));
                continue;
            }
            // Spread bodies deterministically around the zodiac using each
            // body's mean daily motion so aspects and sign exits are
            // exercised without needing a real ephemeris.
            let phase = (julian_day * planet.mean_daily_motion()) % 360.0;
            out.insert(
                planet,
                Ok(RawPosition {
                    longitude: phase.rem_euclid(360.0),
                    latitude: 0.0,
                    daily_motion: planet.mean_daily_motion(),
                }),
            );
        }
        out
    }

    fn houses(&self, julian_day: f64, latitude: f64, _longitude: f64) -> Result<HouseData, HoraryError> {
        let ascendant = self
            .ascendant_override
            .unwrap_or_else(|| (julian_day * 360.25 + latitude).rem_euclid(360.0));
        let midheaven = (ascendant + 270.0).rem_euclid(360.0);
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = (ascendant + i as f64 * 30.0).rem_euclid(360.0);
        }
        Ok(HouseData {
            ascendant,
            midheaven,
            cusps,
        })
    }
}

/// A small fixed gazetteer, enough to drive tests without network access.
pub struct MockGeocoder;

impl Geocoder for MockGeocoder {
    fn geocode(&self, location: &str) -> Result<GeocodeResult, HoraryError> {
        let normalized = location.trim().to_lowercase();
        match normalized.as_str() {
            "washington dc" | "washington, dc" | "washington d.c." => Ok(GeocodeResult {
                latitude: 38.9072,
                longitude: -77.0369,
                canonical_name: "Washington, DC, USA".to_string(),
            }),
            "london" => Ok(GeocodeResult {
                latitude: 51.5072,
                longitude: -0.1276,
                canonical_name: "London, UK".to_string(),
            }),
            "" => Err(HoraryError::location("location string is empty")),
            other => Err(HoraryError::location(format!("no match for location '{other}'"))),
        }
    }
}

/// Resolves the three `REGION_BOXES` and otherwise falls back to UTC, per
/// the regional-box fallback chain.
pub struct MockTimezoneResolver;

impl TimezoneResolver for MockTimezoneResolver {
    fn resolve(&self, latitude: f64, longitude: f64) -> TimezoneResolution {
        for region in REGION_BOXES {
            if latitude >= region.min_lat
                && latitude <= region.max_lat
                && longitude >= region.min_lon
                && longitude <= region.max_lon
            {
                return TimezoneResolution {
                    timezone: region.timezone.to_string(),
                    utc_offset_minutes: region.utc_offset_minutes,
                    resolved_via: ResolvedVia::RegionalFallback,
                };
            }
        }
        TimezoneResolution {
            timezone: "UTC".to_string(),
            utc_offset_minutes: 0,
            resolved_via: ResolvedVia::UtcDefault,
        }
    }
}

/// The three collaborators bundled for one `judge()` call.
pub struct Collaborators<'a> {
    pub ephemeris: &'a dyn Ephemeris,
    pub geocoder: &'a dyn Geocoder,
    pub timezone_resolver: &'a dyn TimezoneResolver,
}
