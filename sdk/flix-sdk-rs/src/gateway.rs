//! JSON-RPC gateway executor.
//!
//! Sends resolved Cadence and JSON-Cadence arguments to a gateway service
//! that signs and submits on the caller's behalf.

use async_trait::async_trait;
use flix_types::{cadence_json, Argument, TemplateDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

use crate::errors::CallError;
use crate::executor::Executor;

/// Default gateway endpoint.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8888";

const SEND_TRANSACTION: &str = "flow_sendTransaction";
const EXECUTE_SCRIPT: &str = "flow_executeScript";

/// RPC request.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

/// RPC response.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Executor backed by a JSON-RPC gateway.
#[derive(Debug)]
pub struct GatewayClient {
    http: reqwest::Client,
    url: String,
    network: String,
    next_id: AtomicU64,
}

impl GatewayClient {
    /// Create a client for `url`, resolving imports for `network`.
    pub fn new(url: impl Into<String>, network: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            http,
            url: url.into(),
            network: network.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    /// Request params for one invocation.
    fn params(&self, template: &TemplateDescriptor, args: &[Argument]) -> Result<Value, CallError> {
        let cadence = template
            .resolve_imports(&self.network)
            .map_err(|e| CallError::Rejected(e.to_string()))?;

        let arguments = args
            .iter()
            .map(Argument::to_json_cadence)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CallError::Rejected(e.to_string()))?;

        Ok(json!([{ "cadence": cadence, "arguments": arguments }]))
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, CallError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        debug!("Gateway request {} #{} to {}", method, request.id, self.url);

        let response_text = self.http.post(&self.url).json(&request).send().await?.text().await?;

        let response: RpcResponse = serde_json::from_str(&response_text)
            .map_err(|e| CallError::Decode(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = response.error {
            return Err(CallError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| CallError::Decode("Empty result".to_string()))
    }
}

#[async_trait]
impl Executor for GatewayClient {
    async fn mutate(&self, template: &TemplateDescriptor, args: &[Argument]) -> Result<String, CallError> {
        let params = self.params(template, args)?;
        match self.request(SEND_TRANSACTION, params).await? {
            Value::String(id) => Ok(id),
            other => Err(CallError::Decode(format!("Expected transaction id, got {}", other))),
        }
    }

    async fn query(&self, template: &TemplateDescriptor, args: &[Argument]) -> Result<Value, CallError> {
        let params = self.params(template, args)?;
        let result = self.request(EXECUTE_SCRIPT, params).await?;
        cadence_json::decode(&result).map_err(|e| CallError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flix_types::{ContractDependency, OperationKind, Parameter, SemanticType};
    use std::collections::BTreeMap;

    fn transfer() -> TemplateDescriptor {
        TemplateDescriptor::new(
            OperationKind::Mutation,
            vec![
                Parameter::new("amount", SemanticType::named("UFix64")),
                Parameter::new("to", SemanticType::named("Address")),
            ],
        )
        .unwrap()
        .with_cadence("import FungibleToken from 0xFUNGIBLETOKENADDRESS\ntransaction(amount: UFix64, to: Address) {}")
        .with_dependency(ContractDependency {
            contract: "FungibleToken".to_string(),
            placeholder: Some("0xFUNGIBLETOKENADDRESS".to_string()),
            networks: BTreeMap::from([("testnet".to_string(), "0x9a0766d93b6608b7".to_string())]),
        })
    }

    #[test]
    fn test_params_resolve_and_encode() {
        let client = GatewayClient::new(DEFAULT_GATEWAY_URL, "testnet");
        let args = vec![
            Argument::new(json!("10"), SemanticType::named("UFix64")),
            Argument::new(json!("0xABC"), SemanticType::named("Address")),
        ];

        let params = client.params(&transfer(), &args).unwrap();
        let call = &params[0];
        assert!(call["cadence"]
            .as_str()
            .unwrap()
            .starts_with("import FungibleToken from 0x9a0766d93b6608b7"));
        assert_eq!(
            call["arguments"],
            json!([
                {"type": "UFix64", "value": "10.0"},
                {"type": "Address", "value": "0xABC"}
            ])
        );
    }

    #[test]
    fn test_params_unresolved_network() {
        let client = GatewayClient::new(DEFAULT_GATEWAY_URL, "previewnet");
        let err = client.params(&transfer(), &[]).unwrap_err();
        assert!(matches!(err, CallError::Rejected(_)));
    }

    #[test]
    fn test_rpc_response_shapes() {
        let ok: RpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"abc"}"#).unwrap();
        assert_eq!(ok.result, Some(json!("abc")));

        let err: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"reverted"}}"#).unwrap();
        let error = err.error.unwrap();
        assert_eq!((error.code, error.message.as_str()), (-32000, "reverted"));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_connection_error() {
        let client = GatewayClient::new("http://127.0.0.1:1", "testnet");
        let args = vec![
            Argument::new(json!("10.0"), SemanticType::named("UFix64")),
            Argument::new(json!("0xABC"), SemanticType::named("Address")),
        ];
        let err = client.mutate(&transfer(), &args).await.unwrap_err();
        assert!(matches!(err, CallError::Connection(_)));
    }
}
