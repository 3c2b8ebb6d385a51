//! Error types for the SDK.

use flix_types::{OperationKind, TypesError};
use thiserror::Error;

/// SDK result type.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Failure reported by an external call.
///
/// Carried to the caller unchanged; the SDK never retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    /// Transport failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error object returned by the remote side
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Response could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request refused before submission (validation, revert, ...)
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for CallError {
    fn from(e: reqwest::Error) -> Self {
        CallError::Connection(e.to_string())
    }
}

/// SDK errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdkError {
    /// A declared parameter has no value in the request
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// The request names a parameter the template does not declare
    #[error("Unexpected parameter: {0}")]
    UnexpectedParameter(String),

    /// The external mutate/query call failed
    #[error("External call failed: {0}")]
    ExternalCallFailure(#[from] CallError),

    /// A typed entry point was used on a template of the other kind
    #[error("Template is a {actual}, not a {expected}")]
    KindMismatch {
        expected: OperationKind,
        actual: OperationKind,
    },

    /// Two templates produce the same binding name
    #[error("Duplicate binding: {0}")]
    DuplicateBinding(String),

    /// Template could not be parsed or resolved
    #[error("Template error: {0}")]
    Template(#[from] TypesError),

    /// Empty template query
    #[error("Template query cannot be empty")]
    EmptyQuery,

    /// Template could not be fetched
    #[error("Could not fetch template {query}: {reason}")]
    Fetch { query: String, reason: String },

    /// Local file error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SdkError {
    fn from(e: std::io::Error) -> Self {
        SdkError::Io(e.to_string())
    }
}
