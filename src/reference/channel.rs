//! Authoring-side inputs for reference-bearing fields
//!
//! A [`Channel`] is a symbolic handle to a pipeline input or to an upstream
//! task's output. It is consumed once by the resolver and never stored.

use serde_json::Value;

/// What a channel carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Parameter,
    Artifact,
}

/// Symbolic handle to a pipeline input or an upstream task output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    name: String,
    /// Producer task; absent or empty means a pipeline-level input
    task_name: Option<String>,
    kind: ChannelKind,
}

impl Channel {
    /// Parameter channel bound to an input of the enclosing pipeline
    pub fn pipeline_input(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            task_name: None,
            kind: ChannelKind::Parameter,
        }
    }

    /// Parameter channel bound to an output of an upstream task
    pub fn task_output(task_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            task_name: Some(task_name.into()),
            kind: ChannelKind::Parameter,
        }
    }

    /// Artifact channel (never accepted where a parameter is expected)
    pub fn artifact(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            task_name: None,
            kind: ChannelKind::Artifact,
        }
    }

    /// Bind the channel to a producer task
    pub fn with_task(mut self, task_name: impl Into<String>) -> Self {
        self.task_name = Some(task_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn task_name(&self) -> Option<&str> {
        self.task_name.as_deref().filter(|t| !t.is_empty())
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// `name` for pipeline inputs, `task-name` for task outputs
    pub fn full_name(&self) -> String {
        match self.task_name() {
            Some(task) => format!("{}-{}", task, self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            ChannelKind::Parameter => "parameter",
            ChannelKind::Artifact => "artifact",
        };
        write!(
            f,
            "{{{{channel:task={};name={};kind={};}}}}",
            self.task_name().unwrap_or(""),
            self.name,
            kind
        )
    }
}

/// Value supplied for a reference-bearing field
///
/// `Other` holds any non-string value an untyped authoring layer passes
/// through; the resolver rejects it instead of coercing it.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Literal(String),
    Channel(Channel),
    Other(Value),
}

impl Argument {
    /// The plain string, if this argument is a literal
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Argument::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Argument::Literal(_) => "str",
            Argument::Channel(channel) => match channel.kind() {
                ChannelKind::Parameter => "parameter channel",
                ChannelKind::Artifact => "artifact channel",
            },
            Argument::Other(value) => match value {
                Value::Null => "null",
                Value::Bool(_) => "bool",
                Value::Number(_) => "number",
                Value::String(_) => "str",
                Value::Array(_) => "array",
                Value::Object(_) => "object",
            },
        }
    }
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Literal(s) => write!(f, "'{}'", s),
            Argument::Channel(channel) => write!(f, "{}", channel),
            Argument::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Literal(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Literal(value)
    }
}

impl From<&String> for Argument {
    fn from(value: &String) -> Self {
        Argument::Literal(value.clone())
    }
}

impl From<Channel> for Argument {
    fn from(channel: Channel) -> Self {
        Argument::Channel(channel)
    }
}

impl From<&Channel> for Argument {
    fn from(channel: &Channel) -> Self {
        Argument::Channel(channel.clone())
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Argument::Literal(s),
            other => Argument::Other(other),
        }
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Other(Value::Bool(value))
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Other(Value::from(value))
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Other(Value::from(value))
    }
}
