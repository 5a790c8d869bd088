//! Persistent volume claim mounts

use tracing::instrument;

use crate::error::Result;
use crate::record::PvcMount;
use crate::reference::Argument;
use crate::task::HasPlatformConfig;

use super::Extensions;

impl Extensions {
    /// Mount an existing PersistentVolumeClaim at `mount_path`
    ///
    /// The claim may be named by a constant, a pipeline input, or an
    /// upstream task output (e.g. the name produced by a create-PVC task).
    #[instrument(skip_all, fields(platform = %self.codec.platform()))]
    pub fn mount_pvc<'t, T>(
        &self,
        task: &'t mut T,
        pvc_name: impl Into<Argument>,
        mount_path: impl Into<String>,
    ) -> Result<&'t mut T>
    where
        T: HasPlatformConfig + ?Sized,
    {
        let pvc_name_parameter = self.general.resolve(&pvc_name.into())?;

        self.accumulator()
            .append(task, PvcMount::new(pvc_name_parameter, mount_path))
    }
}
