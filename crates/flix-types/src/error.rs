use thiserror::Error;

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TypesError>;

/// Errors that can occur while loading or resolving templates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    #[error("Invalid template JSON: {0}")]
    Json(String),

    #[error("Template version not found")]
    MissingVersion,

    #[error("Template version {0} not supported")]
    UnsupportedVersion(String),

    #[error("Unknown operation kind: {0}")]
    UnknownOperationKind(String),

    #[error("Invalid type {ty}: {reason}")]
    InvalidType { ty: String, reason: String },

    #[error("Duplicate parameter name: {0}")]
    DuplicateParameter(String),

    #[error("Network {network} not found for contract {contract} in dependencies")]
    UnresolvedImport { network: String, contract: String },

    #[error("Invalid argument for {ty}: {reason}")]
    InvalidArgument { ty: String, reason: String },
}

impl From<serde_json::Error> for TypesError {
    fn from(e: serde_json::Error) -> Self {
        TypesError::Json(e.to_string())
    }
}
