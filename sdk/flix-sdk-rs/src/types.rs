//! SDK types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Named argument values supplied by a caller.
///
/// Key order carries no meaning; binding always follows the template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationRequest {
    values: HashMap<String, Value>,
}

impl InvocationRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a named value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value supplied for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Supplied names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for InvocationRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<Map<String, Value>> for InvocationRequest {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Result of one invocation, passed through from the external call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum InvocationResult {
    /// Submission id of a mutation
    TransactionId(String),
    /// Decoded value of a query
    Value(Value),
}

impl InvocationResult {
    /// Transaction id, if this was a mutation.
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            InvocationResult::TransactionId(id) => Some(id),
            InvocationResult::Value(_) => None,
        }
    }

    /// Query value, if this was a query.
    pub fn value(&self) -> Option<&Value> {
        match self {
            InvocationResult::Value(v) => Some(v),
            InvocationResult::TransactionId(_) => None,
        }
    }
}

/// What to do with request keys the template does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtraArgumentPolicy {
    /// Drop them with a warning
    #[default]
    Ignore,
    /// Fail with `UnexpectedParameter`
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = InvocationRequest::new().arg("to", "0xABC").arg("amount", "10.0");
        assert_eq!(request.len(), 2);
        assert_eq!(request.get("to"), Some(&json!("0xABC")));
        assert!(request.get("from").is_none());
    }

    #[test]
    fn test_request_from_json_object() {
        let json = json!({"x": 3, "y": 4});
        let request = InvocationRequest::from(json.as_object().unwrap().clone());
        assert_eq!(request.get("y"), Some(&json!(4)));
    }

    #[test]
    fn test_result_accessors() {
        let tx = InvocationResult::TransactionId("abc".to_string());
        assert_eq!(tx.transaction_id(), Some("abc"));
        assert!(tx.value().is_none());

        let value = InvocationResult::Value(json!(12));
        assert_eq!(value.value(), Some(&json!(12)));
        assert!(value.transaction_id().is_none());
    }

    #[test]
    fn test_result_serde_keeps_kind() {
        let value = InvocationResult::Value(json!("abc"));
        let encoded = serde_json::to_value(&value).unwrap();
        assert_eq!(encoded, json!({"kind": "value", "result": "abc"}));
        assert_eq!(serde_json::from_value::<InvocationResult>(encoded).unwrap(), value);

        let tx = InvocationResult::TransactionId("abc".to_string());
        let encoded = serde_json::to_value(&tx).unwrap();
        assert_eq!(encoded, json!({"kind": "transaction_id", "result": "abc"}));
        assert_eq!(serde_json::from_value::<InvocationResult>(encoded).unwrap(), tx);
    }
}
