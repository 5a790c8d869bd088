//! Secret extensions: env vars, volumes and image pull secrets

use tracing::instrument;

use crate::error::Result;
use crate::record::{
    ExtensionDescriptor, ImagePullSecret, SecretAsEnv, SecretAsVolume, SecretKeyToEnv,
};
use crate::reference::Argument;
use crate::task::HasPlatformConfig;

use super::Extensions;

impl Extensions {
    /// Expose secret data keys as environment variables
    ///
    /// `secret_key_to_env` maps a data key of the secret to an env var name,
    /// e.g. `[("password", "PASSWORD")]`. Its iteration order is kept; an
    /// empty mapping is accepted.
    #[instrument(skip_all, fields(platform = %self.codec.platform()))]
    pub fn use_secret_as_env<'t, T, K, V>(
        &self,
        task: &'t mut T,
        secret_name: impl Into<Argument>,
        secret_key_to_env: impl IntoIterator<Item = (K, V)>,
    ) -> Result<&'t mut T>
    where
        T: HasPlatformConfig + ?Sized,
        K: Into<String>,
        V: Into<String>,
    {
        let secret_name_parameter = self.secret_names.resolve(&secret_name.into())?;
        let key_to_env = secret_key_to_env
            .into_iter()
            .map(|(key, env)| SecretKeyToEnv::new(key, env))
            .collect();

        self.accumulator()
            .append(task, SecretAsEnv::new(secret_name_parameter, key_to_env))
    }

    /// Mount the secret's data as files under `mount_path`
    #[instrument(skip_all, fields(platform = %self.codec.platform()))]
    pub fn use_secret_as_volume<'t, T>(
        &self,
        task: &'t mut T,
        secret_name: impl Into<Argument>,
        mount_path: impl Into<String>,
        optional: bool,
    ) -> Result<&'t mut T>
    where
        T: HasPlatformConfig + ?Sized,
    {
        let secret_name_parameter = self.secret_names.resolve(&secret_name.into())?;

        self.accumulator().append(
            task,
            SecretAsVolume::new(secret_name_parameter, mount_path, optional),
        )
    }

    /// Pull the task's image with the given registry secrets, in order
    #[instrument(skip_all, fields(platform = %self.codec.platform()))]
    pub fn set_image_pull_secrets<'t, T, A>(
        &self,
        task: &'t mut T,
        secret_names: impl IntoIterator<Item = A>,
    ) -> Result<&'t mut T>
    where
        T: HasPlatformConfig + ?Sized,
        A: Into<Argument>,
    {
        let descriptors = secret_names
            .into_iter()
            .map(|name| {
                let reference = self.secret_names.resolve(&name.into())?;
                Ok(ExtensionDescriptor::from(ImagePullSecret::new(reference)))
            })
            .collect::<Result<Vec<_>>>()?;

        self.accumulator().append_all(task, descriptors)
    }
}
