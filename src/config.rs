//! Extension configuration
//!
//! Selects the platform key records are stored under and how secret names
//! may be referenced.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Environment variables (`PLATFORM_EXT_PLATFORM`, `PLATFORM_EXT_ALLOW_UPSTREAM_SECRETS`)
//! 2. Config file (TOML)
//! 3. Defaults
//!
//! ```toml
//! platform = "kubernetes"
//!
//! [secrets]
//! allow_upstream_output = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codec::{RecordCodec, DEFAULT_PLATFORM};
use crate::error::{ExtensionError, Result};
use crate::reference::Resolver;

pub const ENV_PLATFORM: &str = "PLATFORM_EXT_PLATFORM";
pub const ENV_ALLOW_UPSTREAM_SECRETS: &str = "PLATFORM_EXT_ALLOW_UPSTREAM_SECRETS";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtensionConfig {
    /// Key of the task's platform config the record is stored under
    #[serde(default = "default_platform")]
    pub platform: String,

    /// How secret names may be referenced
    #[serde(default)]
    pub secrets: SecretPolicy,
}

/// Secret name policy
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SecretPolicy {
    /// Accept upstream task outputs as secret names
    #[serde(default)]
    pub allow_upstream_output: bool,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            secrets: SecretPolicy::default(),
        }
    }
}

impl ExtensionConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ExtensionError::Config {
            reason: format!("Failed to parse config: {}", e),
        })?;
        config.validate()
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist.
    /// Returns error if file exists but is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ExtensionError::Config {
            reason: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        Self::from_toml_str(&content)
    }

    /// Merge with environment variables
    ///
    /// Environment variables take precedence over config file values.
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(platform) = lookup(ENV_PLATFORM).filter(|p| !p.is_empty()) {
            self.platform = platform;
        }

        if let Some(raw) = lookup(ENV_ALLOW_UPSTREAM_SECRETS).filter(|v| !v.is_empty()) {
            self.secrets.allow_upstream_output = parse_bool(&raw).ok_or_else(|| {
                warn!(
                    var = ENV_ALLOW_UPSTREAM_SECRETS,
                    value = %raw,
                    "unparsable boolean override"
                );
                ExtensionError::Config {
                    reason: format!(
                        "{} must be true/false/yes/no/1/0, got '{}'",
                        ENV_ALLOW_UPSTREAM_SECRETS, raw
                    ),
                }
            })?;
        }

        Ok(self)
    }

    fn validate(self) -> Result<Self> {
        if self.platform.trim().is_empty() {
            return Err(ExtensionError::Config {
                reason: "platform cannot be empty".to_string(),
            });
        }
        Ok(self)
    }

    /// Resolver for secret names (secret env, secret volume, image pull secrets)
    pub fn secret_name_resolver(&self) -> Resolver {
        Resolver::new(self.secrets.allow_upstream_output)
    }

    /// Resolver for every other reference-bearing field
    pub fn general_resolver(&self) -> Resolver {
        Resolver::general()
    }

    pub fn codec(&self) -> RecordCodec {
        RecordCodec::new(self.platform.clone())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
