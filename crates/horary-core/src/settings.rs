use serde::{Deserialize, Serialize};

/// The closed settings option set for a `judge()` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Free-text location to be geocoded. Mutually exclusive with
    /// `latitude`/`longitude`.
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Date string, parsed against an ordered list of accepted formats.
    pub date: Option<String>,
    pub time: Option<String>,
    /// IANA timezone identifier; resolved from coordinates when absent.
    pub timezone: Option<String>,
    #[serde(default)]
    pub use_current_time: bool,

    /// Overrides derived houses when present.
    pub manual_houses: Option<Vec<u8>>,

    #[serde(default)]
    pub ignore_radicality: bool,
    #[serde(default)]
    pub ignore_void_moon: bool,
    #[serde(default)]
    pub ignore_combustion: bool,
    #[serde(default)]
    pub ignore_saturn_7th: bool,

    /// Overrides `Configuration.confidence.exaltation_bonus` when present.
    pub exaltation_confidence_boost: Option<f64>,
}

impl Settings {
    pub fn uses_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
