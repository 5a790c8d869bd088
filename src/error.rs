//! Error types with fix suggestions
//!
//! Error code ranges:
//! - EXT-010-019: Argument resolution errors
//! - EXT-020-029: Extension record errors
//! - EXT-030-039: Configuration errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtensionError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Coarse classification of an [`ExtensionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value is neither a literal nor a parameter channel
    Type,
    /// A channel points somewhere the call site does not allow
    ReferenceKind,
    /// The stored extension record could not be read or written
    Record,
    /// Configuration could not be read or parsed
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Type => write!(f, "Type"),
            ErrorKind::ReferenceKind => write!(f, "ReferenceKind"),
            ErrorKind::Record => write!(f, "Record"),
            ErrorKind::Config => write!(f, "Config"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExtensionError {
    // ─────────────────────────────────────────────────────────────
    // Argument resolution (EXT-010 to EXT-011)
    // ─────────────────────────────────────────────────────────────

    #[error("EXT-010: Expected a string or a parameter channel, got {value} of type {type_name}")]
    UnsupportedArgument { value: String, type_name: &'static str },

    #[error(
        "EXT-011: Output '{output_key}' of upstream task '{producer_task}' cannot be used here \
         (only constants and pipeline inputs are allowed)"
    )]
    UpstreamNotAllowed {
        producer_task: String,
        output_key: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Extension record (EXT-020 to EXT-022)
    // ─────────────────────────────────────────────────────────────

    #[error("EXT-020: Stored '{platform}' config is malformed: {details}")]
    MalformedRecord { platform: String, details: String },

    #[error("EXT-021: Failed to serialize extension record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("EXT-022: Unknown extension kind '{tag}'")]
    UnknownKind { tag: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration (EXT-030)
    // ─────────────────────────────────────────────────────────────

    #[error("EXT-030: Config error: {reason}")]
    Config { reason: String },
}

impl ExtensionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtensionError::UnsupportedArgument { .. } => ErrorKind::Type,
            ExtensionError::UpstreamNotAllowed { .. } => ErrorKind::ReferenceKind,
            ExtensionError::MalformedRecord { .. }
            | ExtensionError::Serialization(_)
            | ExtensionError::UnknownKind { .. } => ErrorKind::Record,
            ExtensionError::Config { .. } => ErrorKind::Config,
        }
    }
}

impl FixSuggestion for ExtensionError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ExtensionError::UnsupportedArgument { .. } => {
                Some("Pass a string literal or a pipeline parameter channel")
            }
            ExtensionError::UpstreamNotAllowed { .. } => Some(
                "Name the resource with a constant or a pipeline input, \
                 or enable allow_upstream_output in the [secrets] config section",
            ),
            ExtensionError::MalformedRecord { .. } => {
                Some("Check that the task's platform config was written by this library")
            }
            ExtensionError::Serialization(_) => None,
            ExtensionError::UnknownKind { .. } => Some(
                "Use one of: secretAsEnv, secretAsVolume, pvcMount, configMapAsEnv, \
                 configMapAsVolume, imagePullSecret",
            ),
            ExtensionError::Config { .. } => Some("Check the config file syntax and env overrides"),
        }
    }
}
