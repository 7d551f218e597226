//! Provider configuration sourced from the host's configuration object

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Prefix applied to temp names when a descriptor does not set its own.
pub const DEFAULT_PREFIX: &str = "tmpnonebot";

/// Provider configuration.
///
/// Deserialized once from the host's already-loaded configuration object
/// at provider construction; unknown keys are ignored so the crate can
/// share a config blob with the rest of the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default name prefix for temp directories and files.
    pub default_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Create a config with the given default prefix.
    pub fn new(default_prefix: impl Into<String>) -> Self {
        Self {
            default_prefix: default_prefix.into(),
        }
    }

    /// Deserialize from the host's configuration object.
    ///
    /// # Errors
    /// Returns a configuration error if the value cannot be deserialized
    /// (e.g. `default_prefix` is not a string).
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|err| Error::configuration(format!("invalid host configuration: {err}")))
    }

    /// Validate the configuration, returning an error if invalid.
    ///
    /// A prefix containing a path separator would escape the parent
    /// directory of every resource created with it.
    pub fn validate(&self) -> Result<()> {
        if self.default_prefix.contains(['/', '\\']) {
            return Err(Error::configuration(
                "default_prefix must not contain path separators",
            ));
        }
        Ok(())
    }
}
