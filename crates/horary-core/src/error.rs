//! Unified error type for the horary judgment engine

/// Error kinds surfaced by the chart builder and judgment pipeline.
///
/// Kept as one flat enum, one variant per closed error kind in the
/// external interface contract, rather than a tree of nested error types.
#[derive(Debug, thiserror::Error)]
pub enum HoraryError {
    #[error("location error: {0}")]
    LocationError(String),

    #[error("configuration error: {0}")]
    ConfigurationError(String),

    #[error("calculation error for {body}: {reason}")]
    CalculationError { body: String, reason: String },

    #[error("input error: {0}")]
    InputError(String),
}

impl HoraryError {
    pub fn location(msg: impl Into<String>) -> Self {
        HoraryError::LocationError(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        HoraryError::ConfigurationError(msg.into())
    }

    pub fn calculation(body: impl Into<String>, reason: impl Into<String>) -> Self {
        HoraryError::CalculationError {
            body: body.into(),
            reason: reason.into(),
        }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        HoraryError::InputError(msg.into())
    }
}
