use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const RUNTIME_ID: &str = "rust";
pub const HELLO_MESSAGE: &str = "Hello World from Rust Lambda!";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const JSON_CONTENT_TYPE: &str = "application/json";

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Read-only view of the runtime's per-invocation metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
    pub function_version: String,
    pub memory_limit_in_mb: u32,
    pub remaining_time_in_millis: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    pub message: String,
    pub runtime: String,
    pub timestamp: String,
    pub request_id: String,
    pub function_name: String,
    pub function_version: String,
    #[serde(rename = "memoryLimitInMB")]
    pub memory_limit_in_mb: u32,
    pub remaining_time_in_millis: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otel_enabled: Option<bool>,
}

impl ResponsePayload {
    pub fn from_context(
        message: &str,
        runtime: &str,
        context: &InvocationContext,
        otel_enabled: Option<bool>,
    ) -> Self {
        Self {
            message: message.to_string(),
            runtime: runtime.to_string(),
            timestamp: current_timestamp(),
            request_id: context.request_id.clone(),
            function_name: context.function_name.clone(),
            function_version: context.function_version.clone(),
            memory_limit_in_mb: context.memory_limit_in_mb,
            remaining_time_in_millis: context.remaining_time_in_millis,
            otel_enabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorBody {
    /// Bare `{"error": ...}` body used where there is no HTTP layer.
    pub fn internal() -> Self {
        Self {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
            runtime: None,
            timestamp: None,
            request_id: None,
        }
    }

    pub fn internal_for(runtime: &str, context: &InvocationContext) -> Self {
        Self {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
            runtime: Some(runtime.to_string()),
            timestamp: Some(current_timestamp()),
            request_id: Some(context.request_id.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    #[serde(rename = "isBase64Encoded", default)]
    pub is_base64_encoded: bool,
}

impl ApiGatewayResponse {
    pub fn json(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: response_headers(),
            body,
            is_base64_encoded: false,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Result of a direct (non-gateway) invocation, serialized as a bare object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DirectResponse {
    Success(ResponsePayload),
    Error(ErrorBody),
}

impl DirectResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

pub fn response_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
        ("X-Custom-Header".to_string(), JSON_CONTENT_TYPE.to_string()),
    ])
}

pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
