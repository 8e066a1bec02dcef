//! Layered configuration document for the horary judgment engine.
//!
//! A layered, sectioned document (defaults → optional TOML file →
//! `HORARY_`-prefixed environment overrides) rather than a flat env-var
//! struct, because the judgment pipeline's magic numbers (orbs, penalties,
//! bonuses, caps) are deep enough to need real structure.

pub mod sections;

pub use sections::{
    ConfidenceSettings, DignityWeights, MoonSettings, OrbSettings, RadicalitySettings,
    RetrogradeSettings, TimingSettings, VoidMethod,
};

use horary_core::HoraryError;
use serde::{Deserialize, Serialize};

/// The full, validated configuration snapshot: an immutable document with
/// sections `orbs`, `dignity`, `confidence`, `moon`, `radicality`,
/// `retrograde`, and `timing`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub orbs: OrbSettings,
    pub dignity: DignityWeights,
    pub confidence: ConfidenceSettings,
    pub moon: MoonSettings,
    pub radicality: RadicalitySettings,
    pub retrograde: RetrogradeSettings,
    pub timing: TimingSettings,
}

impl Configuration {
    /// Build the default configuration without consulting the filesystem
    /// or environment; used by tests and as the engine's out-of-the-box
    /// behavior.
    pub fn defaults() -> Self {
        Configuration::default()
    }

    /// Load configuration layered as: built-in defaults, an optional
    /// `config/horary.toml` (or `HORARY_CONFIG_FILE`) file, then
    /// `HORARY_`-prefixed environment variables (e.g.
    /// `HORARY_RADICALITY__TOO_EARLY_DEGREES=2`).
    ///
    /// # Errors
    /// Returns [`HoraryError::ConfigurationError`] if a present file or
    /// environment override cannot be parsed, or if validation fails.
    pub fn load() -> Result<Self, HoraryError> {
        let file_path = std::env::var("HORARY_CONFIG_FILE")
            .unwrap_or_else(|_| "config/horary.toml".to_string());

        let defaults = Configuration::defaults();
        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&defaults).map_err(|e| {
                HoraryError::config(format!("failed to serialize default configuration: {e}"))
            })?)
            .add_source(config::File::with_name(&file_path).required(false))
            .add_source(
                config::Environment::with_prefix("HORARY")
                    .separator("__")
                    .try_parsing(true),
            );

        let raw = builder
            .build()
            .map_err(|e| HoraryError::config(format!("failed to build configuration: {e}")))?;

        let configuration: Configuration = raw
            .try_deserialize()
            .map_err(|e| HoraryError::config(format!("failed to deserialize configuration: {e}")))?;

        configuration.validate()?;
        Ok(configuration)
    }

    /// Validate internal consistency: `Err` for genuinely broken settings,
    /// `tracing::warn!` for merely unusual ones.
    pub fn validate(&self) -> Result<(), HoraryError> {
        if self.confidence.yes_floor_min > self.confidence.yes_floor {
            return Err(HoraryError::config(
                "confidence.yes_floor_min must not exceed confidence.yes_floor",
            ));
        }
        if self.confidence.inconclusive_band[0] > self.confidence.inconclusive_band[1] {
            return Err(HoraryError::config(
                "confidence.inconclusive_band must be [low, high] with low <= high",
            ));
        }
        if self.radicality.too_early_degrees >= self.radicality.too_late_degrees {
            return Err(HoraryError::config(
                "radicality.too_early_degrees must be less than radicality.too_late_degrees",
            ));
        }
        if self.orbs.combustion_degrees >= self.orbs.under_beams_degrees {
            tracing::warn!(
                combustion = self.orbs.combustion_degrees,
                under_beams = self.orbs.under_beams_degrees,
                "combustion window is not narrower than under-beams window"
            );
        }
        if self.dignity.angular_cusp_orb_degrees > 10.0 {
            tracing::warn!(
                orb = self.dignity.angular_cusp_orb_degrees,
                "angular cusp orb is unusually wide"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Configuration::defaults().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_yes_floor() {
        let mut config = Configuration::defaults();
        config.confidence.yes_floor_min = 90;
        config.confidence.yes_floor = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_radicality_thresholds() {
        let mut config = Configuration::defaults();
        config.radicality.too_early_degrees = 28.0;
        config.radicality.too_late_degrees = 3.0;
        assert!(config.validate().is_err());
    }
}
