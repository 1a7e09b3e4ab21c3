//! ISS connection settings.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Default ISS host.
pub const DEFAULT_BASE_URL: &str = "https://iss.moex.com";

/// Environment variable overriding [`IssConfig::base_url`].
pub const ENV_BASE_URL: &str = "FINEC_ISS_URL";

/// Environment variable overriding [`IssConfig::timeout_secs`].
pub const ENV_TIMEOUT: &str = "FINEC_ISS_TIMEOUT";

/// Connection settings for the MOEX ISS.
///
/// # Example
///
/// ```rust
/// use finec_config::{IssConfig, Validate};
///
/// let config = IssConfig::default().with_timeout_secs(10);
/// assert!(config.is_valid());
/// assert_eq!(config.base_url, "https://iss.moex.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds. `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for IssConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("finec/{}", env!("CARGO_PKG_VERSION"))
}

impl IssConfig {
    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Applies `FINEC_ISS_URL` / `FINEC_ISS_TIMEOUT` from the process
    /// environment.
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            log::debug!("{ENV_BASE_URL} overrides base_url");
            self.set(ConfigKey::BaseUrl, &url)?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            log::debug!("{ENV_TIMEOUT} overrides timeout_secs");
            self.set(ConfigKey::TimeoutSecs, &timeout)?;
        }
        Ok(())
    }

    /// Reads one setting as a string.
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::BaseUrl => self.base_url.clone(),
            ConfigKey::TimeoutSecs => self
                .timeout_secs
                .map_or_else(|| "none".to_string(), |s| s.to_string()),
            ConfigKey::UserAgent => self.user_agent.clone(),
        }
    }

    /// Parses and stores one setting. The whole config is revalidated.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> ConfigResult<()> {
        let mut updated = self.clone();
        match key {
            ConfigKey::BaseUrl => updated.base_url = value.trim().to_string(),
            ConfigKey::TimeoutSecs => {
                updated.timeout_secs = match value.trim().to_lowercase().as_str() {
                    "" | "none" | "default" => None,
                    v => Some(v.parse().map_err(|_| {
                        ConfigError::validation(
                            key.as_str(),
                            format!("'{value}' is not a whole number of seconds"),
                        )
                    })?),
                }
            }
            ConfigKey::UserAgent => updated.user_agent = value.to_string(),
        }
        updated.validate_or_error()?;
        *self = updated;
        Ok(())
    }

    /// Restores one setting to its default.
    pub fn reset(&mut self, key: ConfigKey) {
        let defaults = Self::default();
        match key {
            ConfigKey::BaseUrl => self.base_url = defaults.base_url,
            ConfigKey::TimeoutSecs => self.timeout_secs = defaults.timeout_secs,
            ConfigKey::UserAgent => self.user_agent = defaults.user_agent,
        }
    }
}

impl Validate for IssConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(ValidationError::new(
                "base_url",
                format!("'{}' must start with http:// or https://", self.base_url),
            ));
        }
        if self.base_url.ends_with('/') {
            errors.push(ValidationError::new("base_url", "must not end with '/'"));
        }
        if self.timeout_secs == Some(0) {
            errors.push(ValidationError::new("timeout_secs", "must be positive"));
        }
        if self.user_agent.trim().is_empty() {
            errors.push(ValidationError::new("user_agent", "must not be empty"));
        }

        errors
    }
}

/// Settable configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// ISS base URL.
    BaseUrl,
    /// Request timeout.
    TimeoutSecs,
    /// User agent header.
    UserAgent,
}

impl ConfigKey {
    /// Parses a key name, accepting a few short aliases.
    pub fn parse(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "base_url" | "url" | "iss_url" => Ok(Self::BaseUrl),
            "timeout_secs" | "timeout" => Ok(Self::TimeoutSecs),
            "user_agent" | "agent" => Ok(Self::UserAgent),
            _ => Err(ConfigError::NotFound { key: s.to_string() }),
        }
    }

    /// Canonical key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseUrl => "base_url",
            Self::TimeoutSecs => "timeout_secs",
            Self::UserAgent => "user_agent",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::BaseUrl => "ISS scheme and host",
            Self::TimeoutSecs => "HTTP request timeout in seconds (none = client default)",
            Self::UserAgent => "User-Agent header",
        }
    }

    /// All keys in display order.
    pub fn all() -> &'static [Self] {
        &[Self::BaseUrl, Self::TimeoutSecs, Self::UserAgent]
    }
}
