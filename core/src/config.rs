//! Client configuration.

/// Origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SWIPE_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix every endpoint path is appended to, verbatim.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `SWIPE_API_BASE_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(base_url) if !base_url.is_empty() => Self { base_url },
            _ => Self::default(),
        }
    }
}
