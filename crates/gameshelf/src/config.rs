//! Client configuration.

use std::time::Duration;

use gameshelf_transport::TransportConfig;

/// Environment variable holding the backend base address.
pub const API_URL_ENV: &str = "GAMESHELF_API_URL";

/// Environment variable holding the per-request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "GAMESHELF_TIMEOUT_SECS";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The timeout variable was set but isn't a whole number of seconds
    /// greater than zero. Carries the raw value.
    #[error("{TIMEOUT_ENV} must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Settings for an [`ApiClient`](crate::ApiClient).
///
/// | Field            | Default                 |
/// |------------------|-------------------------|
/// | `base_url`       | `http://localhost:8080` |
/// | `timeout`        | 10 s                    |
/// | `login_path`     | `/login`                |
/// | `redirect_delay` | 100 ms                  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the backend.
    pub base_url: String,
    /// Total time allowed per request.
    pub timeout: Duration,
    /// Where an expired session sends the user.
    pub login_path: String,
    /// How long after a 401 the expiry event is published.
    pub redirect_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let transport = TransportConfig::default();
        Self {
            base_url: transport.base_url,
            timeout: transport.timeout,
            login_path: "/login".to_string(),
            redirect_delay: Duration::from_millis(100),
        }
    }
}

impl ClientConfig {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidTimeout`] if the timeout variable is
    /// set but isn't a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// The subset of settings the HTTP transport needs.
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }
}
