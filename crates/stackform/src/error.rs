use stackform_document::ValueKind;
use thiserror::Error;

/// Raised when a resource adapter is constructed from an unusable schema or
/// serialized node. Never raised at call time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("schema `{schema}` declares no resource type")]
    MissingResourceType { schema: String },

    #[error("schema `{schema}` declares an empty resource type")]
    EmptyResourceType { schema: String },

    #[error("schema `{schema}` declares more than one resource type: {found:?}")]
    ConflictingResourceTypes { schema: String, found: Vec<String> },

    #[error("invalid serialized node: {0}")]
    InvalidNode(#[from] stackform_json::Error),
}

/// Raised by a call on a node handle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// The call has a shape the schema gives no translation for.
    #[error("unsupported operation `{method}` with {arity} argument(s) on schema `{schema}`")]
    UnsupportedOperation {
        schema: String,
        method: String,
        arity: usize,
    },

    #[error("invalid argument {index} to `{method}`: {reason}")]
    InvalidArgument {
        method: String,
        index: usize,
        reason: String,
    },

    /// A sequence append hit a property already holding another kind of value.
    #[error("cannot append to `{property}`: it holds a {found} value")]
    NotAnArray { property: String, found: ValueKind },

    /// Failure reported by a schema's default method body.
    #[error("`{method}` failed: {message}")]
    Default { method: String, message: String },
}

/// Raised when an arbitrary value cannot be turned into a call argument.
#[derive(Debug, Error)]
pub enum ArgError {
    #[error("cannot serialize value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Convert(#[from] stackform_json::Error),
}
