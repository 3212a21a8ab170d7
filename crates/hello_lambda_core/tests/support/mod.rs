#![allow(dead_code)]

use hello_lambda_core::contract::InvocationContext;
use serde_json::{json, Value};

/// Context used by the worked example in the contract docs.
pub fn example_context() -> InvocationContext {
    InvocationContext {
        request_id: "abc-123".to_string(),
        function_name: "hello".to_string(),
        function_version: "$LATEST".to_string(),
        memory_limit_in_mb: 128,
        remaining_time_in_millis: 3000,
    }
}

pub fn context_with(request_id: &str, memory_limit_in_mb: u32) -> InvocationContext {
    InvocationContext {
        request_id: request_id.to_string(),
        memory_limit_in_mb,
        ..example_context()
    }
}

pub fn rest_api_event() -> Value {
    json!({
        "resource": "/rust",
        "path": "/rust",
        "httpMethod": "GET",
        "headers": {"Host": "example.execute-api.eu-west-1.amazonaws.com"},
        "queryStringParameters": null,
        "requestContext": {"requestId": "gw-1", "stage": "prod"},
        "body": null,
        "isBase64Encoded": false
    })
}

pub fn without_timestamp(mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.remove("timestamp");
    }
    body
}
