//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can run with zero
//! configuration for local development.

use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Client runtime configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Artificial delay applied to catalogue mutations so the UI's
    /// loading states stay visible on fast machines.
    /// Env: `EDUNOVA_SIMULATED_LATENCY_MS`
    /// Default: `1200`
    pub simulated_latency: Duration,

    /// Artificial delay applied to authentication calls.
    /// Env: `EDUNOVA_AUTH_LATENCY_MS`
    /// Default: `2000`
    pub auth_latency: Duration,

    /// How long a banner stays on screen before auto-dismissing.
    /// Env: `EDUNOVA_BANNER_SECS`
    /// Default: `4`
    pub banner_dismiss: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(1200),
            auth_latency: Duration::from_millis(2000),
            banner_dismiss: Duration::from_secs(4),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("EDUNOVA_SIMULATED_LATENCY_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                config.simulated_latency = Duration::from_millis(ms);
            } else {
                tracing::warn!(value = %val, "Invalid EDUNOVA_SIMULATED_LATENCY_MS, using default");
            }
        }

        if let Ok(val) = std::env::var("EDUNOVA_AUTH_LATENCY_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                config.auth_latency = Duration::from_millis(ms);
            } else {
                tracing::warn!(value = %val, "Invalid EDUNOVA_AUTH_LATENCY_MS, using default");
            }
        }

        if let Ok(val) = std::env::var("EDUNOVA_BANNER_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                config.banner_dismiss = Duration::from_secs(secs);
            } else {
                tracing::warn!(value = %val, "Invalid EDUNOVA_BANNER_SECS, using default");
            }
        }

        config
    }

    /// Configuration with all artificial delays removed, for tests.
    pub fn instant() -> Self {
        Self {
            simulated_latency: Duration::ZERO,
            auth_latency: Duration::ZERO,
            banner_dismiss: Duration::ZERO,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG` when set; otherwise defaults to debug output for
/// the EduNova crates and warnings for everything else.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("edunova_client=debug,edunova_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
