//! Client configuration from the environment.

use std::time::Duration;

/// Connection settings for [`crate::RentClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the rent backend, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Read `RENTDESK_API_BASE` and `RENTDESK_API_TIMEOUT_SECS`, falling
    /// back to the local dev defaults with a warning.
    pub fn from_env() -> Self {
        let base_url = std::env::var("RENTDESK_API_BASE").unwrap_or_else(|_| {
            tracing::warn!("RENTDESK_API_BASE not set; using local dev default");
            "http://localhost:5000".to_string()
        });

        let timeout = match std::env::var("RENTDESK_API_TIMEOUT_SECS") {
            Ok(raw) => match raw.parse() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(
                        value = %raw,
                        "RENTDESK_API_TIMEOUT_SECS is not a number; using 30s"
                    );
                    Duration::from_secs(30)
                }
            },
            Err(_) => Duration::from_secs(30),
        };

        Self {
            base_url,
            timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_timeout() {
        let config = ClientConfig::new("https://rent.example.com");
        assert_eq!(config.base_url, "https://rent.example.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    // The only test in this binary touching process env; keep it that
    // way, env mutation is process-global.
    #[test]
    fn malformed_timeout_env_falls_back_to_default() {
        unsafe {
            std::env::set_var("RENTDESK_API_BASE", "https://rent.example.com");
            std::env::set_var("RENTDESK_API_TIMEOUT_SECS", "soon");
        }

        let config = ClientConfig::from_env();

        assert_eq!(config.base_url, "https://rent.example.com");
        assert_eq!(config.timeout, Duration::from_secs(30));

        unsafe {
            std::env::remove_var("RENTDESK_API_BASE");
            std::env::remove_var("RENTDESK_API_TIMEOUT_SECS");
        }
    }
}
