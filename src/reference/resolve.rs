//! Resolver - Argument → ParameterReference
//!
//! Two configurations are in use and must stay distinct:
//! - `Resolver::secret_name()`: constants and pipeline inputs only
//! - `Resolver::general()`: constants, pipeline inputs and upstream outputs

use crate::error::{ExtensionError, Result};

use super::channel::{Argument, ChannelKind};
use super::ParameterReference;

/// Converts one authoring-side argument into a [`ParameterReference`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    allow_upstream_output: bool,
}

impl Resolver {
    pub const fn new(allow_upstream_output: bool) -> Self {
        Self {
            allow_upstream_output,
        }
    }

    /// Resolver for secret names (upstream task outputs rejected)
    pub const fn secret_name() -> Self {
        Self::new(false)
    }

    /// Resolver accepting every reference kind
    pub const fn general() -> Self {
        Self::new(true)
    }

    pub fn allows_upstream_output(&self) -> bool {
        self.allow_upstream_output
    }

    pub fn resolve(&self, argument: &Argument) -> Result<ParameterReference> {
        match argument {
            Argument::Literal(value) => Ok(ParameterReference::Constant(value.as_str().into())),

            Argument::Channel(channel) if channel.kind() == ChannelKind::Parameter => {
                match channel.task_name() {
                    None => Ok(ParameterReference::PipelineInput(channel.full_name())),
                    Some(task) if self.allow_upstream_output => {
                        Ok(ParameterReference::UpstreamOutput {
                            producer_task: task.to_string(),
                            output_key: channel.name().to_string(),
                        })
                    }
                    Some(task) => Err(ExtensionError::UpstreamNotAllowed {
                        producer_task: task.to_string(),
                        output_key: channel.name().to_string(),
                    }),
                }
            }

            // Artifact channels and untyped values
            other => Err(ExtensionError::UnsupportedArgument {
                value: other.to_string(),
                type_name: other.type_name(),
            }),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::general()
    }
}
