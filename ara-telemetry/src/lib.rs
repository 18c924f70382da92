//! # ara-telemetry
//!
//! Logging setup for the ARA research assistant.
//!
//! Pipeline stages emit structured `tracing` events carrying a `stage` field
//! (`load`, `index`, `classify`, `retrieve`, `compose`, `assemble`,
//! `generate`) plus input and output summaries. This crate installs the
//! process-wide subscriber that prints them, and [`memory`] provides a layer
//! that records them so tests can assert on what the pipeline did.
//!
//! ```rust,ignore
//! ara_telemetry::init_telemetry("ara-cli", LogFormat::Text)?;
//! ```

pub mod memory;

#[cfg(test)]
mod test_capture;

use memory::{CapturedEvents, EventCaptureLayer};
use tracing::Subscriber;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

/// Default filter directive when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Output format of the console log layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber, honouring `RUST_LOG`.
///
/// Logs go to stderr so they never interleave with answers printed on stdout.
///
/// # Errors
///
/// Fails if a global subscriber was already installed.
pub fn init_telemetry(service_name: &str, format: LogFormat) -> Result<(), TryInitError> {
    init_with_filter(service_name, format, DEFAULT_FILTER)
}

/// Like [`init_telemetry`] with an explicit fallback filter directive.
///
/// # Errors
///
/// Fails if a global subscriber was already installed.
pub fn init_with_filter(
    service_name: &str,
    format: LogFormat,
    default_directive: &str,
) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(default_directive));
    let result = match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    if result.is_ok() {
        tracing::debug!(service = service_name, ?format, "telemetry initialised");
    }
    result
}

/// A subscriber that records every event into `storage`.
///
/// Meant for `tracing::subscriber::set_default` in tests; nothing is printed.
pub fn capture_subscriber(storage: CapturedEvents) -> impl Subscriber + Send + Sync {
    Registry::default().with(EventCaptureLayer::new(storage))
}
