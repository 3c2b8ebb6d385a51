//! Callable bindings over templates.

use flix_types::{OperationKind, TemplateDescriptor};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{Result, SdkError};
use crate::executor::Executor;
use crate::invoker::invoke_with_policy;
use crate::types::{ExtraArgumentPolicy, InvocationRequest, InvocationResult};

/// A template paired with the executor that runs it.
///
/// Cheap to clone; the template and executor are shared.
pub struct Binding<E: ?Sized> {
    template: Arc<TemplateDescriptor>,
    executor: Arc<E>,
    policy: ExtraArgumentPolicy,
}

impl<E: ?Sized> Clone for Binding<E> {
    fn clone(&self) -> Self {
        Self {
            template: Arc::clone(&self.template),
            executor: Arc::clone(&self.executor),
            policy: self.policy,
        }
    }
}

impl<E: Executor + ?Sized> Binding<E> {
    /// Create a new binding.
    pub fn new(template: TemplateDescriptor, executor: Arc<E>) -> Self {
        Self {
            template: Arc::new(template),
            executor,
            policy: ExtraArgumentPolicy::default(),
        }
    }

    /// Set the policy for undeclared arguments.
    pub fn with_policy(mut self, policy: ExtraArgumentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Function name derived from the template title.
    pub fn name(&self) -> String {
        self.template.function_name()
    }

    pub fn template(&self) -> &TemplateDescriptor {
        &self.template
    }

    pub fn kind(&self) -> OperationKind {
        self.template.kind
    }

    /// Invoke with named arguments.
    pub async fn call(&self, request: &InvocationRequest) -> Result<InvocationResult> {
        invoke_with_policy(self.executor.as_ref(), &self.template, request, self.policy).await
    }

    /// Invoke a transaction template and return its id.
    pub async fn mutate(&self, request: &InvocationRequest) -> Result<String> {
        self.expect_kind(OperationKind::Mutation)?;
        match self.call(request).await? {
            InvocationResult::TransactionId(id) => Ok(id),
            InvocationResult::Value(_) => Err(self.mismatch(OperationKind::Mutation)),
        }
    }

    /// Invoke a script template and return its value.
    pub async fn query(&self, request: &InvocationRequest) -> Result<Value> {
        self.expect_kind(OperationKind::Query)?;
        match self.call(request).await? {
            InvocationResult::Value(value) => Ok(value),
            InvocationResult::TransactionId(_) => Err(self.mismatch(OperationKind::Query)),
        }
    }

    fn expect_kind(&self, expected: OperationKind) -> Result<()> {
        if self.template.kind == expected {
            Ok(())
        } else {
            Err(self.mismatch(expected))
        }
    }

    fn mismatch(&self, expected: OperationKind) -> SdkError {
        SdkError::KindMismatch {
            expected,
            actual: self.template.kind,
        }
    }
}

/// Bindings keyed by function name.
pub struct BindingSet<E: ?Sized> {
    executor: Arc<E>,
    policy: ExtraArgumentPolicy,
    bindings: HashMap<String, Binding<E>>,
}

impl<E: Executor + ?Sized> BindingSet<E> {
    /// Create an empty set sharing one executor.
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            executor,
            policy: ExtraArgumentPolicy::default(),
            bindings: HashMap::new(),
        }
    }

    /// Build a set from several templates.
    pub fn from_templates(
        executor: Arc<E>,
        templates: impl IntoIterator<Item = TemplateDescriptor>,
    ) -> Result<Self> {
        let mut set = Self::new(executor);
        for template in templates {
            set.insert(template)?;
        }
        Ok(set)
    }

    /// Policy applied to bindings inserted after this call.
    pub fn with_policy(mut self, policy: ExtraArgumentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add a template. Fails if its name is already taken.
    pub fn insert(&mut self, template: TemplateDescriptor) -> Result<&Binding<E>> {
        let binding = Binding::new(template, Arc::clone(&self.executor)).with_policy(self.policy);
        let name = binding.name();
        if self.bindings.contains_key(&name) {
            return Err(SdkError::DuplicateBinding(name));
        }
        tracing::debug!("Registered binding {}", name);
        Ok(self.bindings.entry(name).or_insert(binding))
    }

    pub fn get(&self, name: &str) -> Option<&Binding<E>> {
        self.bindings.get(name)
    }

    /// Binding names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
