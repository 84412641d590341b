//! Tree executor
//!
//! Running a [`DeclarativeNode`] builds a fresh assertion from its selector
//! and check value, applies its `properties`, evaluates it and returns the
//! matching payload:
//!
//! - on success, the `success` payload merged with the payload of the
//!   `children` node, which is run in turn (child keys win on conflict);
//! - on failure, the `fail` payload; `children` is never built.
//!
//! A child cannot turn a success into a failure, it only contributes its
//! payload. Running never mutates the node, so running twice gives the same
//! result.
//!
//! # Example
//!
//! ```rust
//! use assertree::{executor, DeclarativeNode};
//! use serde_json::json;
//!
//! let node: DeclarativeNode = serde_json::from_value(json!({
//!     "type": "equals",
//!     "checkValue": 5,
//!     "properties": {"strict": false},
//!     "success": {"ok": true},
//!     "fail": {"ok": false}
//! }))
//! .unwrap();
//!
//! let result = executor::run_against(&node, &json!("5")).unwrap();
//! assert_eq!(
//!     serde_json::to_value(&result).unwrap(),
//!     json!({"succeeded": true, "payload": {"ok": true}})
//! );
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ExecutionError;
use crate::node::{DeclarativeNode, RESERVED_PROPERTIES};
use crate::payload::Payload;
use crate::predicate::{Assertion, Configurable};
use crate::registry::{TypeDescriptor, TypeSelector};
use crate::Semigroup;

/// Outcome of running an assertion tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    /// Whether the root assertion held.
    pub succeeded: bool,
    /// The merged payload.
    pub payload: Payload,
}

/// Run a tree, comparing each node against its own configured operands.
pub fn run(node: &DeclarativeNode) -> Result<ExecutionResult, ExecutionError> {
    execute(node, None)
}

/// Run a tree with `subject` as the right-hand operand of every node.
///
/// The subject replaces any `value` property. Assertions without a
/// right-hand operand ignore it; invocables receive it as their second
/// argument.
pub fn run_against(
    node: &DeclarativeNode,
    subject: &Value,
) -> Result<ExecutionResult, ExecutionError> {
    execute(node, Some(subject))
}

fn execute(
    node: &DeclarativeNode,
    subject: Option<&Value>,
) -> Result<ExecutionResult, ExecutionError> {
    let succeeded = evaluate(node, subject)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        assertion = node.type_name(),
        succeeded,
        "evaluated assertion"
    );

    if !succeeded {
        return Ok(ExecutionResult {
            succeeded,
            payload: payload_of(node.fail()),
        });
    }

    let mut payload = payload_of(node.success());
    if let Some(child) = node.children() {
        payload = payload.combine(execute(child, subject)?.payload);
    }
    Ok(ExecutionResult { succeeded, payload })
}

fn payload_of(map: Option<&Map<String, Value>>) -> Payload {
    map.cloned().map(Payload::from).unwrap_or_default()
}

fn evaluate(node: &DeclarativeNode, subject: Option<&Value>) -> Result<bool, ExecutionError> {
    match node.selector() {
        TypeSelector::Invocable(invocable) => {
            invocable.call(node.check_value(), subject.unwrap_or(&Value::Null))
        }
        TypeSelector::Registered(descriptor) | TypeSelector::External(descriptor) => {
            evaluate_type(descriptor, node, subject)
        }
    }
}

fn evaluate_type(
    descriptor: &TypeDescriptor,
    node: &DeclarativeNode,
    subject: Option<&Value>,
) -> Result<bool, ExecutionError> {
    let mut assertion = descriptor.instantiate(node.check_value().clone());

    let overrides = node
        .properties()
        .into_iter()
        .flatten()
        .filter(|(name, _)| !RESERVED_PROPERTIES.contains(&name.as_str()));
    for (name, value) in overrides {
        assertion
            .set_property(name, value)
            .map_err(|source| ExecutionError::InvalidProperty {
                assertion: descriptor.name().to_string(),
                source,
            })?;
    }

    if let Some(subject) = subject {
        assertion.set_value(subject.clone());
    }
    Ok(assertion.evaluate())
}
