//! Extension Accumulator - load → push → store
//!
//! Every call re-reads the stored record, so the merge step has no hidden
//! state between calls and can be tested on its own.

use tracing::debug;

use crate::codec::RecordCodec;
use crate::error::Result;
use crate::record::ExtensionDescriptor;
use crate::task::HasPlatformConfig;

/// Appends descriptors to a task's stored record
#[derive(Debug, Clone, Copy)]
pub struct Accumulator<'c> {
    codec: &'c RecordCodec,
}

impl<'c> Accumulator<'c> {
    pub fn new(codec: &'c RecordCodec) -> Self {
        Self { codec }
    }

    /// Append one descriptor under its kind and return the task for chaining
    ///
    /// No cross-kind checks are made (two kinds may share a mount path).
    pub fn append<'t, T: HasPlatformConfig + ?Sized>(
        &self,
        task: &'t mut T,
        descriptor: impl Into<ExtensionDescriptor>,
    ) -> Result<&'t mut T> {
        self.append_all(task, [descriptor.into()])
    }

    /// Append several descriptors in one load/store cycle
    pub fn append_all<'t, T, I>(&self, task: &'t mut T, descriptors: I) -> Result<&'t mut T>
    where
        T: HasPlatformConfig + ?Sized,
        I: IntoIterator<Item = ExtensionDescriptor>,
    {
        let mut record = self.codec.load(task)?;

        for descriptor in descriptors {
            let kind = descriptor.kind();
            record.push(descriptor);
            debug!(
                platform = %self.codec.platform(),
                kind = %kind,
                position = record.len(kind) - 1,
                "appended extension descriptor"
            );
        }

        self.codec.store(task, &record)?;
        Ok(task)
    }
}
