//! Binding invoker.
//!
//! Turns a named-argument request into the positional, typed argument list
//! of a template and dispatches it to the external call matching the
//! template's kind.

use flix_types::{Argument, OperationKind, TemplateDescriptor};
use tracing::{debug, warn};

use crate::errors::{Result, SdkError};
use crate::executor::Executor;
use crate::types::{ExtraArgumentPolicy, InvocationRequest, InvocationResult};

/// Build the ordered argument list for `template` from `request`.
///
/// Order follows `template.parameters`; the request's own order is never
/// consulted. Fails before anything is sent if a declared name is missing,
/// or, under [`ExtraArgumentPolicy::Reject`], if an undeclared name is present.
pub fn bind_arguments(
    template: &TemplateDescriptor,
    request: &InvocationRequest,
    policy: ExtraArgumentPolicy,
) -> Result<Vec<Argument>> {
    let args = template
        .parameters
        .iter()
        .map(|param| {
            request
                .get(&param.name)
                .map(|value| Argument::new(value.clone(), param.ty.clone()))
                .ok_or_else(|| SdkError::MissingParameter(param.name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut extra: Vec<&str> = request
        .names()
        .filter(|name| template.parameter(name).is_none())
        .collect();
    if !extra.is_empty() {
        extra.sort_unstable();
        match policy {
            ExtraArgumentPolicy::Reject => {
                return Err(SdkError::UnexpectedParameter(extra[0].to_string()));
            }
            ExtraArgumentPolicy::Ignore => {
                warn!("Ignoring undeclared arguments for '{}': {:?}", template.title, extra);
            }
        }
    }

    Ok(args)
}

/// Invoke `template` through `executor`, ignoring undeclared arguments.
pub async fn invoke<E: Executor + ?Sized>(
    executor: &E,
    template: &TemplateDescriptor,
    request: &InvocationRequest,
) -> Result<InvocationResult> {
    invoke_with_policy(executor, template, request, ExtraArgumentPolicy::Ignore).await
}

/// Invoke `template` through `executor`.
///
/// The executor's result is returned as is. Its failures surface as
/// [`SdkError::ExternalCallFailure`] without retry. Mutations are not
/// idempotent: every call is a new submission.
pub async fn invoke_with_policy<E: Executor + ?Sized>(
    executor: &E,
    template: &TemplateDescriptor,
    request: &InvocationRequest,
    policy: ExtraArgumentPolicy,
) -> Result<InvocationResult> {
    let args = bind_arguments(template, request, policy)?;

    debug!(
        "Invoking {} '{}' with {} arguments",
        template.kind,
        template.title,
        args.len()
    );

    let result = match template.kind {
        OperationKind::Mutation => InvocationResult::TransactionId(executor.mutate(template, &args).await?),
        OperationKind::Query => InvocationResult::Value(executor.query(template, &args).await?),
    };

    Ok(result)
}
