//! Task handle and its opaque platform storage
//!
//! The graph compiler owns the task type. This crate only needs the
//! per-platform config map, reached through [`HasPlatformConfig`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Access to a task's platform config (platform key → stored record)
pub trait HasPlatformConfig {
    fn platform_config(&self) -> &Map<String, Value>;
    fn platform_config_mut(&mut self) -> &mut Map<String, Value>;
}

/// Minimal task node carrying a name and its platform config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTask {
    pub name: String,
    #[serde(default)]
    pub platform_config: Map<String, Value>,
}

impl PipelineTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform_config: Map::new(),
        }
    }
}

impl HasPlatformConfig for PipelineTask {
    fn platform_config(&self) -> &Map<String, Value> {
        &self.platform_config
    }

    fn platform_config_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.platform_config
    }
}
