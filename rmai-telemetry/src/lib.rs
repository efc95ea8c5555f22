//! # rmai-telemetry
//!
//! One place to install the `tracing` subscriber for rmai binaries.
//!
//! Log lines go to stderr so that command output on stdout stays clean.
//! Verbosity follows `RUST_LOG` when set, and [`TelemetryConfig::default_directive`]
//! otherwise.
//!
//! ```rust,ignore
//! rmai_telemetry::init_telemetry(&TelemetryConfig::default().with_json(true))?;
//! tracing::info!(count = 126, "fetched all locations");
//! ```

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter { directive: String, message: String },

    /// A global subscriber was already installed.
    #[error("failed to install subscriber: {0}")]
    Install(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
    /// Filter used when `RUST_LOG` is unset, e.g. `warn` or `rmai_data=debug`.
    pub default_directive: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { json: false, default_directive: "warn".to_string() }
    }
}

impl TelemetryConfig {
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Filter from `RUST_LOG`, or from the default directive.
    pub fn env_filter(&self) -> Result<EnvFilter, TelemetryError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.default_directive).map_err(|e| TelemetryError::InvalidFilter {
            directive: self.default_directive.clone(),
            message: e.to_string(),
        })
    }
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(false).with_writer(std::io::stderr)).try_init()
    };
    installed.map_err(|e| TelemetryError::Install(e.to_string()))
}
