#![forbid(unsafe_code)]

//! Structured logging hooks.
//!
//! With the `tracing` feature, the `tracing` macros are re-exported here and
//! at the crate root so dependent crates can log without naming `tracing`
//! directly. With `tracing-json`, [`init_subscriber`] installs a global
//! `tracing-subscriber` writing to stderr, either human-readable or as JSON
//! lines.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Error returned when a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Output format for [`init_subscriber`].
#[cfg(feature = "tracing-json")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Install the global subscriber.
///
/// `filter` uses `EnvFilter` directive syntax (e.g. `"reel_widgets=debug"`);
/// the `RUST_LOG` environment variable takes precedence when set.
#[cfg(feature = "tracing-json")]
pub fn init_subscriber(filter: &str, format: LogFormat) -> Result<(), InitError> {
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}
