//! Config map extensions: env vars and volumes

use tracing::instrument;

use crate::error::Result;
use crate::record::{ConfigMapAsEnv, ConfigMapAsVolume, ConfigMapKeyToEnv};
use crate::reference::Argument;
use crate::task::HasPlatformConfig;

use super::Extensions;

impl Extensions {
    /// Expose config map data keys as environment variables
    #[instrument(skip_all, fields(platform = %self.codec.platform()))]
    pub fn use_config_map_as_env<'t, T, K, V>(
        &self,
        task: &'t mut T,
        config_map_name: impl Into<Argument>,
        config_map_key_to_env: impl IntoIterator<Item = (K, V)>,
    ) -> Result<&'t mut T>
    where
        T: HasPlatformConfig + ?Sized,
        K: Into<String>,
        V: Into<String>,
    {
        let config_map_name_parameter = self.general.resolve(&config_map_name.into())?;
        let key_to_env = config_map_key_to_env
            .into_iter()
            .map(|(key, env)| ConfigMapKeyToEnv::new(key, env))
            .collect();

        self.accumulator().append(
            task,
            ConfigMapAsEnv::new(config_map_name_parameter, key_to_env),
        )
    }

    /// Mount the config map's data as files under `mount_path`
    #[instrument(skip_all, fields(platform = %self.codec.platform()))]
    pub fn use_config_map_as_volume<'t, T>(
        &self,
        task: &'t mut T,
        config_map_name: impl Into<Argument>,
        mount_path: impl Into<String>,
        optional: bool,
    ) -> Result<&'t mut T>
    where
        T: HasPlatformConfig + ?Sized,
    {
        let config_map_name_parameter = self.general.resolve(&config_map_name.into())?;

        self.accumulator().append(
            task,
            ConfigMapAsVolume::new(config_map_name_parameter, mount_path, optional),
        )
    }
}
