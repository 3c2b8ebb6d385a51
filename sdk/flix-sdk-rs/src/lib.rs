//! flixkit Rust SDK
//!
//! Binds interaction templates to callable functions. A binding takes named
//! arguments, orders and types them by the template's declared parameters,
//! and hands them to an [`Executor`] that performs the actual transaction or
//! script call.
//!
//! # Example
//! ```rust,ignore
//! use flix_sdk::{Binding, GatewayClient, InvocationRequest, TemplateSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (template, _) = TemplateSource::default().load("transfer-flow").await.unwrap();
//!     let gateway = Arc::new(GatewayClient::new("http://localhost:8888", "testnet"));
//!     let binding = Binding::new(template, gateway);
//!     let request = InvocationRequest::new().arg("to", "0x01cf0e2f2f715450").arg("amount", "10.0");
//!     let tx_id = binding.mutate(&request).await.unwrap();
//!     println!("Submitted: {}", tx_id);
//! }
//! ```

pub mod binding;
pub mod errors;
pub mod executor;
pub mod gateway;
pub mod invoker;
pub mod source;
pub mod types;

pub use binding::{Binding, BindingSet};
pub use errors::{CallError, Result, SdkError};
pub use executor::Executor;
pub use gateway::GatewayClient;
pub use invoker::{bind_arguments, invoke, invoke_with_policy};
pub use source::{TemplateLocation, TemplateSource};
pub use types::*;

/// Re-export flix-types for convenience
pub use flix_types::{Argument, OperationKind, SemanticType, TemplateDescriptor};
