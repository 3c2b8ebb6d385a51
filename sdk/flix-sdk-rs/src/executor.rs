//! External call interface.
//!
//! Transaction construction, signing, submission and query execution all
//! live behind this trait. The invoker only hands over the template and the
//! ordered, type-tagged arguments.

use async_trait::async_trait;
use flix_types::{Argument, TemplateDescriptor};
use serde_json::Value;

use crate::errors::CallError;

/// Something that can execute a template remotely.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Submit a state-changing request.
    ///
    /// Returns once an id is assigned; does not wait for finality.
    async fn mutate(
        &self,
        template: &TemplateDescriptor,
        args: &[Argument],
    ) -> std::result::Result<String, CallError>;

    /// Execute a read-only request and return its decoded value.
    async fn query(
        &self,
        template: &TemplateDescriptor,
        args: &[Argument],
    ) -> std::result::Result<Value, CallError>;
}
