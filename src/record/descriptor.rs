//! Typed descriptors, one struct per extension kind
//!
//! Every descriptor keeps the canonical `ParameterReference` plus the flat
//! literal name read by older consumers. The literal name is only present
//! when the reference is a constant.
//!
//! Fields this crate does not model are kept in `extra` so that a
//! load → store cycle never drops them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::reference::ParameterReference;

fn literal_name(reference: &ParameterReference) -> Option<String> {
    reference.constant().map(str::to_string)
}

// ═══════════════════════════════════════════════════════════════
// Secrets
// ═══════════════════════════════════════════════════════════════

/// Secret data key → environment variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeyToEnv {
    pub secret_key: String,
    pub env_var: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SecretKeyToEnv {
    pub fn new(secret_key: impl Into<String>, env_var: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            env_var: env_var.into(),
            extra: Map::new(),
        }
    }
}

/// `secretAsEnv` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretAsEnv {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    pub secret_name_parameter: ParameterReference,
    #[serde(default)]
    pub key_to_env: Vec<SecretKeyToEnv>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SecretAsEnv {
    pub fn new(secret_name_parameter: ParameterReference, key_to_env: Vec<SecretKeyToEnv>) -> Self {
        Self {
            secret_name: literal_name(&secret_name_parameter),
            secret_name_parameter,
            key_to_env,
            extra: Map::new(),
        }
    }
}

/// `secretAsVolume` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretAsVolume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    pub secret_name_parameter: ParameterReference,
    pub mount_path: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SecretAsVolume {
    pub fn new(
        secret_name_parameter: ParameterReference,
        mount_path: impl Into<String>,
        optional: bool,
    ) -> Self {
        Self {
            secret_name: literal_name(&secret_name_parameter),
            secret_name_parameter,
            mount_path: mount_path.into(),
            optional,
            extra: Map::new(),
        }
    }
}

/// `imagePullSecret` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePullSecret {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    pub secret_name_parameter: ParameterReference,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImagePullSecret {
    pub fn new(secret_name_parameter: ParameterReference) -> Self {
        Self {
            secret_name: literal_name(&secret_name_parameter),
            secret_name_parameter,
            extra: Map::new(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
// Volumes
// ═══════════════════════════════════════════════════════════════

/// `pvcMount` entry (the literal name lives under `constant`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvcMount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
    pub pvc_name_parameter: ParameterReference,
    pub mount_path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PvcMount {
    pub fn new(pvc_name_parameter: ParameterReference, mount_path: impl Into<String>) -> Self {
        Self {
            constant: literal_name(&pvc_name_parameter),
            pvc_name_parameter,
            mount_path: mount_path.into(),
            extra: Map::new(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
// Config maps
// ═══════════════════════════════════════════════════════════════

/// Config map data key → environment variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapKeyToEnv {
    pub config_map_key: String,
    pub env_var: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigMapKeyToEnv {
    pub fn new(config_map_key: impl Into<String>, env_var: impl Into<String>) -> Self {
        Self {
            config_map_key: config_map_key.into(),
            env_var: env_var.into(),
            extra: Map::new(),
        }
    }
}

/// `configMapAsEnv` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapAsEnv {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_name: Option<String>,
    pub config_map_name_parameter: ParameterReference,
    #[serde(default)]
    pub key_to_env: Vec<ConfigMapKeyToEnv>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigMapAsEnv {
    pub fn new(
        config_map_name_parameter: ParameterReference,
        key_to_env: Vec<ConfigMapKeyToEnv>,
    ) -> Self {
        Self {
            config_map_name: literal_name(&config_map_name_parameter),
            config_map_name_parameter,
            key_to_env,
            extra: Map::new(),
        }
    }
}

/// `configMapAsVolume` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapAsVolume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_name: Option<String>,
    pub config_map_name_parameter: ParameterReference,
    pub mount_path: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigMapAsVolume {
    pub fn new(
        config_map_name_parameter: ParameterReference,
        mount_path: impl Into<String>,
        optional: bool,
    ) -> Self {
        Self {
            config_map_name: literal_name(&config_map_name_parameter),
            config_map_name_parameter,
            mount_path: mount_path.into(),
            optional,
            extra: Map::new(),
        }
    }
}
