//! Reference Module - parameter references for extension fields
//!
//! Turns what the authoring layer passes for a resource name into the
//! canonical IR node stored on the task:
//! - `channel`: authoring-side inputs (Channel, Argument)
//! - `resolve`: Resolver configurations (secret-name, general)
//!
//! Data flow:
//! ```text
//! "secret-name" / Channel / other value → Argument
//!                                           ↓
//!                                   Resolver::resolve
//!                                           ↓
//!                                  ParameterReference
//! ```
//!
//! Wire shape of [`ParameterReference`] (exactly one key):
//! ```json
//! {"runtimeValue": {"constant": "secret-name"}}
//! {"componentInputParameter": "secret_name_input"}
//! {"taskOutputParameter": {"producerTask": "comp-with-output", "outputParameterKey": "Output"}}
//! ```

mod channel;
mod resolve;

pub use channel::{Argument, Channel, ChannelKind};
pub use resolve::Resolver;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolved reference to a parameter value (IR node)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ParameterSpec", into = "ParameterSpec")]
pub enum ParameterReference {
    /// Literal value known at authoring time
    ///
    /// Authoring always produces strings; stored records may carry any JSON
    /// value here.
    Constant(Value),
    /// Named input of the enclosing pipeline
    PipelineInput(String),
    /// Named output of another task in the same graph scope
    UpstreamOutput {
        producer_task: String,
        output_key: String,
    },
}

impl ParameterReference {
    /// String constant, if this is one
    pub fn constant(&self) -> Option<&str> {
        match self {
            ParameterReference::Constant(value) => value.as_str(),
            _ => None,
        }
    }

    pub fn is_upstream_output(&self) -> bool {
        matches!(self, ParameterReference::UpstreamOutput { .. })
    }
}

impl std::fmt::Display for ParameterReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterReference::Constant(Value::String(value)) => write!(f, "constant:{}", value),
            ParameterReference::Constant(value) => write!(f, "constant:{}", value),
            ParameterReference::PipelineInput(name) => write!(f, "input:{}", name),
            ParameterReference::UpstreamOutput {
                producer_task,
                output_key,
            } => write!(f, "task:{}.{}", producer_task, output_key),
        }
    }
}

/// Serialized form, externally tagged so exactly one key is ever present
#[derive(Clone, Serialize, Deserialize)]
enum ParameterSpec {
    #[serde(rename = "runtimeValue")]
    RuntimeValue { constant: Value },

    #[serde(rename = "componentInputParameter")]
    ComponentInputParameter(String),

    #[serde(rename = "taskOutputParameter", rename_all = "camelCase")]
    TaskOutputParameter {
        producer_task: String,
        output_parameter_key: String,
    },
}

impl From<ParameterSpec> for ParameterReference {
    fn from(spec: ParameterSpec) -> Self {
        match spec {
            ParameterSpec::RuntimeValue { constant } => ParameterReference::Constant(constant),
            ParameterSpec::ComponentInputParameter(name) => ParameterReference::PipelineInput(name),
            ParameterSpec::TaskOutputParameter {
                producer_task,
                output_parameter_key,
            } => ParameterReference::UpstreamOutput {
                producer_task,
                output_key: output_parameter_key,
            },
        }
    }
}

impl From<ParameterReference> for ParameterSpec {
    fn from(reference: ParameterReference) -> Self {
        match reference {
            ParameterReference::Constant(constant) => ParameterSpec::RuntimeValue { constant },
            ParameterReference::PipelineInput(name) => ParameterSpec::ComponentInputParameter(name),
            ParameterReference::UpstreamOutput {
                producer_task,
                output_key,
            } => ParameterSpec::TaskOutputParameter {
                producer_task,
                output_parameter_key: output_key,
            },
        }
    }
}
