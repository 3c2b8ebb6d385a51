use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of remote operation a template describes.
///
/// Templates spell these as `"transaction"` and `"script"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// State-changing transaction; completes with a submission id.
    #[serde(rename = "transaction")]
    Mutation,
    /// Read-only script; completes with a decoded value.
    #[serde(rename = "script")]
    Query,
}

impl OperationKind {
    /// Template spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Mutation => "transaction",
            OperationKind::Query => "script",
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, OperationKind::Mutation)
    }

    pub fn is_query(&self) -> bool {
        matches!(self, OperationKind::Query)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transaction" => Ok(OperationKind::Mutation),
            "script" => Ok(OperationKind::Query),
            other => Err(TypesError::UnknownOperationKind(other.to_string())),
        }
    }
}
