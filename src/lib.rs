//! platform-ext - platform extension records for pipeline tasks
//!
//! Attaches platform-specific requirements (secrets, volumes, config maps,
//! image pull secrets) to tasks without the task model knowing the target
//! platform.
//!
//! ```
//! use platform_ext::{Channel, Extensions, PipelineTask};
//!
//! let ext = Extensions::default();
//! let mut task = PipelineTask::new("comp");
//!
//! ext.use_secret_as_volume(&mut task, "secret-name", "/mnt/secret", false)?;
//! ext.use_secret_as_env(&mut task, Channel::pipeline_input("name1"), [("password", "PWD")])?;
//!
//! let record = ext.record(&task)?;
//! assert_eq!(record.secret_as_volume().len(), 1);
//! assert_eq!(record.secret_as_env().len(), 1);
//! # Ok::<(), platform_ext::ExtensionError>(())
//! ```

pub mod accumulator;
pub mod codec;
pub mod config;
pub mod error;
pub mod extensions;
pub mod record;
pub mod reference;
pub mod task;

pub use accumulator::Accumulator;
pub use codec::RecordCodec;
pub use config::{ExtensionConfig, SecretPolicy};
pub use error::{ErrorKind, ExtensionError, FixSuggestion};
pub use extensions::Extensions;
pub use record::{ExtensionDescriptor, ExtensionKind, ExtensionRecord};
pub use reference::{Argument, Channel, ChannelKind, ParameterReference, Resolver};
pub use task::{HasPlatformConfig, PipelineTask};
