//! Tracing configuration for embedding applications.
//!
//! The judgment pipeline itself only emits `tracing` events; it never
//! installs a subscriber. Call one of these once at application startup,
//! before the first `judge()` call, if you want the engine's spans on
//! stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pretty, human-readable logging for local development.
pub fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false)
                .pretty(),
        )
        .init();

    tracing::info!("horary-engine tracing initialized with level: {}", log_level);
}

/// JSON logging for ingestion by structured log pipelines.
pub fn init_tracing_json(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false)
                .json(),
        )
        .init();

    tracing::info!("horary-engine tracing initialized (json), level: {}", log_level);
}
