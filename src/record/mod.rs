//! Record Module - typed per-task extension record
//!
//! - `descriptor`: one struct per extension kind
//! - `ExtensionKind`: wire tag of each kind
//! - `ExtensionDescriptor`: any one descriptor
//! - `ExtensionRecord`: ordered descriptors per kind + unknown fields
//!
//! Stored shape (under the task's platform key):
//! ```yaml
//! secretAsEnv:
//!   - secretName: secret-name
//!     secretNameParameter: {runtimeValue: {constant: secret-name}}
//!     keyToEnv: [{secretKey: password, envVar: PASSWORD}]
//! pvcMount:
//!   - constant: pvc-name
//!     pvcNameParameter: {runtimeValue: {constant: pvc-name}}
//!     mountPath: /data
//! nodeSelector: {labels: {disk: ssd}}   # not modeled, kept as-is
//! ```
//!
//! A loaded record remembers the object it was read from. Writing it back
//! starts from that object and only appends descriptors pushed since, so
//! stored fields keep their values, their order and any nested fields this
//! crate does not model.

mod descriptor;

pub use descriptor::{
    ConfigMapAsEnv, ConfigMapAsVolume, ConfigMapKeyToEnv, ImagePullSecret, PvcMount,
    SecretAsEnv, SecretAsVolume, SecretKeyToEnv,
};

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ExtensionError;

/// Named category of platform-specific requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    SecretAsEnv,
    SecretAsVolume,
    PvcMount,
    ConfigMapAsEnv,
    ConfigMapAsVolume,
    ImagePullSecret,
}

impl ExtensionKind {
    pub const ALL: [ExtensionKind; 6] = [
        ExtensionKind::SecretAsEnv,
        ExtensionKind::SecretAsVolume,
        ExtensionKind::PvcMount,
        ExtensionKind::ConfigMapAsEnv,
        ExtensionKind::ConfigMapAsVolume,
        ExtensionKind::ImagePullSecret,
    ];

    /// Field name of this kind in the stored record
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionKind::SecretAsEnv => "secretAsEnv",
            ExtensionKind::SecretAsVolume => "secretAsVolume",
            ExtensionKind::PvcMount => "pvcMount",
            ExtensionKind::ConfigMapAsEnv => "configMapAsEnv",
            ExtensionKind::ConfigMapAsVolume => "configMapAsVolume",
            ExtensionKind::ImagePullSecret => "imagePullSecret",
        }
    }
}

impl std::fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionKind {
    type Err = ExtensionError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        ExtensionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ExtensionError::UnknownKind {
                tag: tag.to_string(),
            })
    }
}

/// One descriptor of any kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtensionDescriptor {
    SecretAsEnv(SecretAsEnv),
    SecretAsVolume(SecretAsVolume),
    PvcMount(PvcMount),
    ConfigMapAsEnv(ConfigMapAsEnv),
    ConfigMapAsVolume(ConfigMapAsVolume),
    ImagePullSecret(ImagePullSecret),
}

impl ExtensionDescriptor {
    pub fn kind(&self) -> ExtensionKind {
        match self {
            ExtensionDescriptor::SecretAsEnv(_) => ExtensionKind::SecretAsEnv,
            ExtensionDescriptor::SecretAsVolume(_) => ExtensionKind::SecretAsVolume,
            ExtensionDescriptor::PvcMount(_) => ExtensionKind::PvcMount,
            ExtensionDescriptor::ConfigMapAsEnv(_) => ExtensionKind::ConfigMapAsEnv,
            ExtensionDescriptor::ConfigMapAsVolume(_) => ExtensionKind::ConfigMapAsVolume,
            ExtensionDescriptor::ImagePullSecret(_) => ExtensionKind::ImagePullSecret,
        }
    }
}

macro_rules! impl_from_descriptor {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for ExtensionDescriptor {
                fn from(descriptor: $variant) -> Self {
                    ExtensionDescriptor::$variant(descriptor)
                }
            }
        )*
    };
}

impl_from_descriptor!(
    SecretAsEnv,
    SecretAsVolume,
    PvcMount,
    ConfigMapAsEnv,
    ConfigMapAsVolume,
    ImagePullSecret,
);

/// Per-task structured configuration for one platform
///
/// Descriptor order within a kind is call order. Top-level fields of kinds
/// this crate does not know are kept in `extra`, in their stored order.
/// Equality compares descriptors and `extra` only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionRecord {
    #[serde(default)]
    secret_as_env: Vec<SecretAsEnv>,
    #[serde(default)]
    secret_as_volume: Vec<SecretAsVolume>,
    #[serde(default)]
    pvc_mount: Vec<PvcMount>,
    #[serde(default)]
    config_map_as_env: Vec<ConfigMapAsEnv>,
    #[serde(default)]
    config_map_as_volume: Vec<ConfigMapAsVolume>,
    #[serde(default)]
    image_pull_secret: Vec<ImagePullSecret>,
    #[serde(flatten)]
    extra: Map<String, Value>,
    /// Object this record was loaded from (empty for a new record)
    #[serde(skip)]
    stored: Map<String, Value>,
}

impl PartialEq for ExtensionRecord {
    fn eq(&self, other: &Self) -> bool {
        self.secret_as_env == other.secret_as_env
            && self.secret_as_volume == other.secret_as_volume
            && self.pvc_mount == other.pvc_mount
            && self.config_map_as_env == other.config_map_as_env
            && self.config_map_as_volume == other.config_map_as_volume
            && self.image_pull_secret == other.image_pull_secret
            && self.extra == other.extra
    }
}

impl ExtensionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a stored object, remembering it for [`Self::to_stored`]
    pub(crate) fn from_stored(stored: &Value) -> serde_json::Result<Self> {
        let mut record = Self::deserialize(stored)?;
        if let Value::Object(map) = stored {
            record.stored = map.clone();
        }
        Ok(record)
    }

    /// Object to write back: the loaded object with new descriptors appended
    ///
    /// Loaded descriptors are the prefix of each kind's sequence (records
    /// only grow), so everything past the stored length is new. A kind not
    /// present before is added after the existing fields.
    pub(crate) fn to_stored(&self) -> serde_json::Result<Map<String, Value>> {
        let mut stored = self.stored.clone();

        for kind in ExtensionKind::ALL {
            let key = kind.as_str();
            let written = stored.get(key).and_then(Value::as_array).map_or(0, Vec::len);
            let mut appended = self
                .descriptors(kind)
                .iter()
                .skip(written)
                .map(serde_json::to_value)
                .collect::<serde_json::Result<Vec<_>>>()?;
            if appended.is_empty() {
                continue;
            }

            match stored.get_mut(key).and_then(Value::as_array_mut) {
                Some(items) => items.append(&mut appended),
                None => {
                    stored.insert(key.to_string(), Value::Array(appended));
                }
            }
        }

        Ok(stored)
    }

    /// Append a descriptor to the sequence of its kind
    pub fn push(&mut self, descriptor: impl Into<ExtensionDescriptor>) {
        match descriptor.into() {
            ExtensionDescriptor::SecretAsEnv(d) => self.secret_as_env.push(d),
            ExtensionDescriptor::SecretAsVolume(d) => self.secret_as_volume.push(d),
            ExtensionDescriptor::PvcMount(d) => self.pvc_mount.push(d),
            ExtensionDescriptor::ConfigMapAsEnv(d) => self.config_map_as_env.push(d),
            ExtensionDescriptor::ConfigMapAsVolume(d) => self.config_map_as_volume.push(d),
            ExtensionDescriptor::ImagePullSecret(d) => self.image_pull_secret.push(d),
        }
    }

    /// Number of descriptors of one kind
    pub fn len(&self, kind: ExtensionKind) -> usize {
        match kind {
            ExtensionKind::SecretAsEnv => self.secret_as_env.len(),
            ExtensionKind::SecretAsVolume => self.secret_as_volume.len(),
            ExtensionKind::PvcMount => self.pvc_mount.len(),
            ExtensionKind::ConfigMapAsEnv => self.config_map_as_env.len(),
            ExtensionKind::ConfigMapAsVolume => self.config_map_as_volume.len(),
            ExtensionKind::ImagePullSecret => self.image_pull_secret.len(),
        }
    }

    /// True when no descriptor and no unknown field is present
    pub fn is_empty(&self) -> bool {
        ExtensionKind::ALL.iter().all(|kind| self.len(*kind) == 0) && self.extra.is_empty()
    }

    /// Descriptors of one kind, in call order
    pub fn descriptors(&self, kind: ExtensionKind) -> Vec<ExtensionDescriptor> {
        fn wrap<D: Clone + Into<ExtensionDescriptor>>(items: &[D]) -> Vec<ExtensionDescriptor> {
            items.iter().cloned().map(Into::into).collect()
        }

        match kind {
            ExtensionKind::SecretAsEnv => wrap(&self.secret_as_env),
            ExtensionKind::SecretAsVolume => wrap(&self.secret_as_volume),
            ExtensionKind::PvcMount => wrap(&self.pvc_mount),
            ExtensionKind::ConfigMapAsEnv => wrap(&self.config_map_as_env),
            ExtensionKind::ConfigMapAsVolume => wrap(&self.config_map_as_volume),
            ExtensionKind::ImagePullSecret => wrap(&self.image_pull_secret),
        }
    }

    pub fn secret_as_env(&self) -> &[SecretAsEnv] {
        &self.secret_as_env
    }

    pub fn secret_as_volume(&self) -> &[SecretAsVolume] {
        &self.secret_as_volume
    }

    pub fn pvc_mount(&self) -> &[PvcMount] {
        &self.pvc_mount
    }

    pub fn config_map_as_env(&self) -> &[ConfigMapAsEnv] {
        &self.config_map_as_env
    }

    pub fn config_map_as_volume(&self) -> &[ConfigMapAsVolume] {
        &self.config_map_as_volume
    }

    pub fn image_pull_secret(&self) -> &[ImagePullSecret] {
        &self.image_pull_secret
    }

    /// Stored fields this crate does not model
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
