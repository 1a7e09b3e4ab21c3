//! Finec Configuration Layer
//!
//! Settings for reaching the MOEX Informational & Statistical Server (ISS):
//! base URL, request timeout and user agent.
//!
//! # Sources, in priority order
//!
//! 1. Environment: `FINEC_ISS_URL`, `FINEC_ISS_TIMEOUT`
//! 2. JSON file at `<config_dir>/finec/config.json` (or an explicit path)
//! 3. Built-in defaults
//!
//! # Example
//!
//! ```rust
//! use finec_config::{ConfigKey, IssConfig};
//!
//! let mut config = IssConfig::default();
//! config.set(ConfigKey::TimeoutSecs, "30").unwrap();
//! assert_eq!(config.timeout_secs, Some(30));
//!
//! // Values that fail validation are rejected and leave the config untouched.
//! assert!(config.set(ConfigKey::BaseUrl, "iss.moex.com").is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod iss;
mod store;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use iss::{ConfigKey, IssConfig, DEFAULT_BASE_URL, ENV_BASE_URL, ENV_TIMEOUT};
pub use store::{default_config_path, load_effective, load_from, save_to};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::iss::{ConfigKey, IssConfig};
}
