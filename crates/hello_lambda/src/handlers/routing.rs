use hello_lambda_core::contract::InvocationContext;
use hello_lambda_core::encoding::SerializationFailure;
use hello_lambda_core::handler::InvocationHandler;
use serde_json::Value;

/// Which handler entry point a deployed binary exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    Gateway,
    Direct,
    /// Inspect each event and pick gateway or direct per invocation.
    Auto,
}

pub fn handle_event(
    handler: &dyn InvocationHandler,
    entry_point: EntryPoint,
    event: &Value,
    context: &InvocationContext,
) -> Result<Value, SerializationFailure> {
    let use_gateway = match entry_point {
        EntryPoint::Gateway => true,
        EntryPoint::Direct => false,
        EntryPoint::Auto => is_gateway_event(event),
    };

    let response = if use_gateway {
        serde_json::to_value(handler.handle_gateway(event, context))?
    } else {
        serde_json::to_value(handler.handle_direct(event, context))?
    };
    Ok(response)
}

/// REST (v1) proxy events carry `httpMethod`, HTTP API (v2) events carry
/// `routeKey`; both carry `requestContext`.
pub fn is_gateway_event(event: &Value) -> bool {
    event
        .as_object()
        .map(|object| {
            ["httpMethod", "routeKey", "requestContext"]
                .iter()
                .any(|key| object.contains_key(*key))
        })
        .unwrap_or(false)
}
