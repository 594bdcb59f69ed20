use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Invalid number: cannot represent {0} as a property value")]
    InvalidNumber(String),

    #[error("Invalid reference: target of `Ref` must be a string, found {0}")]
    InvalidReference(String),

    #[error("Missing `Type` entry in serialized node")]
    MissingType,

    #[error("Invalid node: {0}")]
    InvalidNode(String),
}
