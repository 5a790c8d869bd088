//! Extensions Module - typed operations over the accumulator
//!
//! One operation per extension kind:
//! - `secret`: `use_secret_as_env`, `use_secret_as_volume`, `set_image_pull_secrets`
//! - `volume`: `mount_pvc`
//! - `config_map`: `use_config_map_as_env`, `use_config_map_as_volume`
//!
//! Every operation resolves all of its arguments before touching the task,
//! so a rejected argument never leaves a partial record behind.
//!
//! ```text
//! use_secret_as_env(task, name, mapping)
//!        ↓
//! Resolver::resolve(name)            (fails fast)
//!        ↓
//! Accumulator::append(task, SecretAsEnv)
//!        ↓
//! RecordCodec::load → push → store
//! ```

mod config_map;
mod secret;
mod volume;

use crate::accumulator::Accumulator;
use crate::codec::RecordCodec;
use crate::config::ExtensionConfig;
use crate::error::Result;
use crate::record::ExtensionRecord;
use crate::reference::Resolver;
use crate::task::HasPlatformConfig;

/// Entry point for attaching platform extensions to tasks
#[derive(Debug, Clone)]
pub struct Extensions {
    codec: RecordCodec,
    /// Resolver for secret names
    secret_names: Resolver,
    /// Resolver for PVC and config map names
    general: Resolver,
}

impl Extensions {
    pub fn new(config: &ExtensionConfig) -> Self {
        Self {
            codec: config.codec(),
            secret_names: config.secret_name_resolver(),
            general: config.general_resolver(),
        }
    }

    pub fn codec(&self) -> &RecordCodec {
        &self.codec
    }

    /// Current record of a task (empty if nothing was attached yet)
    pub fn record<T: HasPlatformConfig + ?Sized>(&self, task: &T) -> Result<ExtensionRecord> {
        self.codec.load(task)
    }

    fn accumulator(&self) -> Accumulator<'_> {
        Accumulator::new(&self.codec)
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new(&ExtensionConfig::default())
    }
}
