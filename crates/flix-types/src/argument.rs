use crate::cadence_json;
use crate::error::Result;
use crate::semantic_type::SemanticType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One positional argument: a caller value tagged with its declared type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub value: Value,
    #[serde(rename = "type")]
    pub ty: SemanticType,
}

impl Argument {
    pub fn new(value: Value, ty: SemanticType) -> Self {
        Self { value, ty }
    }

    /// Wire form of the argument.
    pub fn to_json_cadence(&self) -> Result<Value> {
        cadence_json::encode(&self.value, &self.ty)
    }
}
