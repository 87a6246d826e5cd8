use std::time::Duration;

use avatar_speech::config::SpeechConfig;

/// Default HTTP request timeout. Must stay above the vendor call timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Inconsistent settings detected by [`ServerConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "REQUEST_TIMEOUT_SECS ({request_secs}s) must be greater than \
         VENDOR_TIMEOUT_SECS ({vendor:?})"
    )]
    TimeoutOrder { request_secs: u64, vendor: Duration },
}

/// Server configuration loaded from environment variables.
///
/// All server fields have defaults suitable for local development. The
/// vendor credential has none and must be provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`). Must exceed the
    /// vendor call timeout.
    pub request_timeout_secs: u64,
    /// Vendor endpoint, credential, and polling settings.
    pub speech: SpeechConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `5000`    |
    /// | `CORS_ORIGINS`         | `*`       |
    /// | `REQUEST_TIMEOUT_SECS` | `60`      |
    ///
    /// Vendor settings are read by [`SpeechConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            speech: SpeechConfig::from_env(),
        }
    }

    /// Check cross-field constraints.
    ///
    /// The request timeout must be strictly longer than the vendor call
    /// timeout; otherwise the outer timeout layer answers `408` before a
    /// slow vendor call can fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Duration::from_secs(self.request_timeout_secs) <= self.speech.request_timeout {
            return Err(ConfigError::TimeoutOrder {
                request_secs: self.request_timeout_secs,
                vendor: self.speech.request_timeout,
            });
        }
        Ok(())
    }

    /// Whether CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
