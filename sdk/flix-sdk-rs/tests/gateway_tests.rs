//! Gateway client tests
//!
//! Runs `GatewayClient` against a local JSON-RPC stub that answers every
//! request with a fixed response and records what it received.

use axum::{routing::post, Json, Router};
use flix_sdk::{Binding, CallError, Executor, GatewayClient, InvocationRequest, SdkError, TemplateDescriptor};
use flix_types::parse_template;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const TRANSFER_TOKENS: &str = include_str!("../../../fixtures/transfer-tokens.template.json");
const MULTIPLY: &str = include_str!("../../../fixtures/multiply.template.json");

type Received = Arc<Mutex<Vec<Value>>>;

/// Start a stub gateway replying with `reply`. Returns its URL.
async fn spawn_gateway(reply: Value) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&received);

    let app = Router::new().route(
        "/",
        post(move |Json(body): Json<Value>| {
            let seen = Arc::clone(&seen);
            let reply = reply.clone();
            async move {
                seen.lock().unwrap().push(body);
                Json(reply)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

fn transfer_tokens() -> TemplateDescriptor {
    parse_template(TRANSFER_TOKENS).unwrap()
}

fn multiply() -> TemplateDescriptor {
    parse_template(MULTIPLY).unwrap()
}

#[tokio::test]
async fn test_send_transaction_round_trip() {
    let tx_id = "f".repeat(64);
    let (url, received) = spawn_gateway(json!({"jsonrpc": "2.0", "id": 1, "result": tx_id})).await;
    let binding = Binding::new(transfer_tokens(), Arc::new(GatewayClient::new(url, "testnet")));

    let request = InvocationRequest::new().arg("to", "0x01cf0e2f2f715450").arg("amount", "10.0");
    let id = binding.mutate(&request).await.unwrap();
    assert_eq!(id, tx_id);

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let call = &received[0];
    assert_eq!(call["jsonrpc"], "2.0");
    assert_eq!(call["method"], "flow_sendTransaction");
    assert_eq!(
        call["params"][0]["arguments"],
        json!([
            {"type": "UFix64", "value": "10.0"},
            {"type": "Address", "value": "0x01cf0e2f2f715450"}
        ])
    );
    assert!(!call["params"][0]["cadence"].as_str().unwrap().contains("0xFUNGIBLETOKENADDRESS"));
}

#[tokio::test]
async fn test_execute_script_decodes_value() {
    let (url, received) = spawn_gateway(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {"type": "Int", "value": "12"}
    }))
    .await;
    let binding = Binding::new(multiply(), Arc::new(GatewayClient::new(url, "testnet")));

    let value = binding
        .query(&InvocationRequest::new().arg("x", "3").arg("y", "4"))
        .await
        .unwrap();
    assert_eq!(value, json!(12));

    let call = &received.lock().unwrap()[0];
    assert_eq!(call["method"], "flow_executeScript");
    assert_eq!(
        call["params"][0]["arguments"],
        json!([{"type": "Int", "value": "3"}, {"type": "Int", "value": "4"}])
    );
}

#[tokio::test]
async fn test_non_string_transaction_id_is_decode_error() {
    let (url, _) = spawn_gateway(json!({"jsonrpc": "2.0", "id": 1, "result": {"id": 7}})).await;
    let client = GatewayClient::new(url, "testnet");

    let err = client.mutate(&multiply(), &[]).await.unwrap_err();
    assert!(matches!(err, CallError::Decode(_)));
}

#[tokio::test]
async fn test_rpc_error_object_is_passed_through() {
    let (url, _) = spawn_gateway(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": {"code": -32000, "message": "execution reverted"}
    }))
    .await;
    let binding = Binding::new(transfer_tokens(), Arc::new(GatewayClient::new(url, "testnet")));

    let request = InvocationRequest::new().arg("to", "0x01").arg("amount", "1.0");
    let err = binding.mutate(&request).await.unwrap_err();
    assert_eq!(
        err,
        SdkError::ExternalCallFailure(CallError::Rpc {
            code: -32000,
            message: "execution reverted".to_string(),
        })
    );
}

#[tokio::test]
async fn test_malformed_script_result_is_decode_error() {
    let (url, _) = spawn_gateway(json!({"jsonrpc": "2.0", "id": 1, "result": 12})).await;
    let client = GatewayClient::new(url, "testnet");

    let err = client.query(&multiply(), &[]).await.unwrap_err();
    assert!(matches!(err, CallError::Decode(_)));
}
