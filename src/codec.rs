//! Extension Record Codec
//!
//! The only place where the typed [`ExtensionRecord`] meets the task's
//! generic platform config map.
//!
//! - `load`: empty record when the platform key is absent
//! - `store`: one write of the platform key, starting from the object the
//!   record was loaded from; an empty record is never written onto a task
//!   that has no entry, so `store(load(t))` is a byte-for-byte no-op

use serde_json::Value;
use tracing::trace;

use crate::error::{ExtensionError, Result};
use crate::record::ExtensionRecord;
use crate::task::HasPlatformConfig;

/// Platform key used when none is configured
pub const DEFAULT_PLATFORM: &str = "kubernetes";

/// Reads and writes one platform's record on a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCodec {
    platform: String,
}

impl RecordCodec {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }

    pub fn kubernetes() -> Self {
        Self::new(DEFAULT_PLATFORM)
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn load<T: HasPlatformConfig + ?Sized>(&self, task: &T) -> Result<ExtensionRecord> {
        let Some(stored) = task.platform_config().get(&self.platform) else {
            trace!(platform = %self.platform, "no stored record, starting empty");
            return Ok(ExtensionRecord::new());
        };

        if !stored.is_object() {
            return Err(self.malformed(format!("expected an object, got {}", type_of(stored))));
        }

        ExtensionRecord::from_stored(stored).map_err(|e| self.malformed(e.to_string()))
    }

    pub fn store<T: HasPlatformConfig + ?Sized>(
        &self,
        task: &mut T,
        record: &ExtensionRecord,
    ) -> Result<()> {
        let stored = record.to_stored()?;
        let config = task.platform_config_mut();
        if stored.is_empty() && !config.contains_key(&self.platform) {
            return Ok(());
        }

        config.insert(self.platform.clone(), Value::Object(stored));
        Ok(())
    }

    fn malformed(&self, details: String) -> ExtensionError {
        ExtensionError::MalformedRecord {
            platform: self.platform.clone(),
            details,
        }
    }
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::kubernetes()
    }
}

fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
