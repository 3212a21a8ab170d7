use serde_json::Value;
use tracing::{error, info};

use crate::contract::{
    ApiGatewayResponse, DirectResponse, ErrorBody, InvocationContext, ResponsePayload,
    HELLO_MESSAGE, RUNTIME_ID, STATUS_INTERNAL_ERROR, STATUS_OK,
};
use crate::encoding::{JsonEncoder, PayloadEncoder, SerializationFailure};

/// The two entry points a runtime can route an invocation to.
pub trait InvocationHandler: Send + Sync {
    fn handle_gateway(&self, event: &Value, context: &InvocationContext) -> ApiGatewayResponse;

    fn handle_direct(&self, input: &Value, context: &InvocationContext) -> DirectResponse;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSettings {
    pub message: String,
    pub runtime: String,
    /// Reported as `otelEnabled` on gateway responses.
    pub otel_enabled: bool,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            message: HELLO_MESSAGE.to_string(),
            runtime: RUNTIME_ID.to_string(),
            otel_enabled: false,
        }
    }
}

impl HandlerSettings {
    pub fn with_otel_enabled(mut self, otel_enabled: bool) -> Self {
        self.otel_enabled = otel_enabled;
        self
    }
}

#[derive(Debug, Clone)]
pub struct HelloHandler<E = JsonEncoder> {
    settings: HandlerSettings,
    encoder: E,
}

impl HelloHandler<JsonEncoder> {
    pub fn new(settings: HandlerSettings) -> Self {
        Self::with_encoder(settings, JsonEncoder)
    }
}

impl<E: PayloadEncoder> HelloHandler<E> {
    pub fn with_encoder(settings: HandlerSettings, encoder: E) -> Self {
        Self { settings, encoder }
    }

    pub fn settings(&self) -> &HandlerSettings {
        &self.settings
    }

    fn log_inbound(
        &self,
        event: &Value,
        context: &InvocationContext,
    ) -> Result<(), SerializationFailure> {
        let event_json = self.encoder.encode(event)?;
        info!(request_id = %context.request_id, "Event: {event_json}");
        info!(
            request_id = %context.request_id,
            "Context: RequestId={}, FunctionName={}",
            context.request_id,
            context.function_name
        );
        Ok(())
    }

    fn build_gateway_body(
        &self,
        event: &Value,
        context: &InvocationContext,
    ) -> Result<String, SerializationFailure> {
        self.log_inbound(event, context)?;

        let payload = ResponsePayload::from_context(
            &self.settings.message,
            &self.settings.runtime,
            context,
            Some(self.settings.otel_enabled),
        );
        let body = self.encoder.encode(&payload)?;
        info!(request_id = %context.request_id, "Response: {body}");
        Ok(body)
    }

    fn build_direct_payload(
        &self,
        input: &Value,
        context: &InvocationContext,
    ) -> Result<ResponsePayload, SerializationFailure> {
        self.log_inbound(input, context)?;

        let payload = ResponsePayload::from_context(
            &self.settings.message,
            &self.settings.runtime,
            context,
            None,
        );
        let encoded = self.encoder.encode(&payload)?;
        info!(request_id = %context.request_id, "Response: {encoded}");
        Ok(payload)
    }

    fn gateway_error_body(&self, context: &InvocationContext) -> String {
        let body = ErrorBody::internal_for(&self.settings.runtime, context);
        // Bypasses the injected encoder: the error body is plain strings only.
        serde_json::to_string(&body)
            .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string())
    }
}

impl<E: PayloadEncoder + Send + Sync> InvocationHandler for HelloHandler<E> {
    fn handle_gateway(&self, event: &Value, context: &InvocationContext) -> ApiGatewayResponse {
        match self.build_gateway_body(event, context) {
            Ok(body) => ApiGatewayResponse::json(STATUS_OK, body),
            Err(failure) => {
                error!(request_id = %context.request_id, "Error processing JSON: {failure}");
                ApiGatewayResponse::json(STATUS_INTERNAL_ERROR, self.gateway_error_body(context))
            }
        }
    }

    fn handle_direct(&self, input: &Value, context: &InvocationContext) -> DirectResponse {
        match self.build_direct_payload(input, context) {
            Ok(payload) => DirectResponse::Success(payload),
            Err(failure) => {
                error!(request_id = %context.request_id, "Error processing JSON: {failure}");
                DirectResponse::Error(ErrorBody::internal())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    struct FailingEncoder;

    impl PayloadEncoder for FailingEncoder {
        fn encode<T: Serialize + ?Sized>(
            &self,
            _value: &T,
        ) -> Result<String, SerializationFailure> {
            Err(SerializationFailure::new("injected encode failure"))
        }
    }

    fn sample_context() -> InvocationContext {
        InvocationContext {
            request_id: "abc-123".to_string(),
            function_name: "hello".to_string(),
            function_version: "$LATEST".to_string(),
            memory_limit_in_mb: 128,
            remaining_time_in_millis: 3000,
        }
    }

    fn sample_event() -> Value {
        json!({
            "httpMethod": "GET",
            "path": "/rust",
            "headers": {"Accept": "application/json"},
            "body": null
        })
    }

    #[test]
    fn gateway_success_returns_payload_body() {
        let handler = HelloHandler::new(HandlerSettings::default().with_otel_enabled(true));
        let response = handler.handle_gateway(&sample_event(), &sample_context());

        assert_eq!(response.status_code, 200);
        let body: Value = serde_json::from_str(&response.body).expect("body should be JSON");
        assert_eq!(body["message"], "Hello World from Rust Lambda!");
        assert_eq!(body["runtime"], "rust");
        assert_eq!(body["requestId"], "abc-123");
        assert_eq!(body["otelEnabled"], true);
    }

    #[test]
    fn gateway_failure_returns_internal_error() {
        let handler = HelloHandler::with_encoder(HandlerSettings::default(), FailingEncoder);
        let response = handler.handle_gateway(&sample_event(), &sample_context());

        assert_eq!(response.status_code, 500);
        assert_eq!(response.headers["Content-Type"], "application/json");
        let body: Value = serde_json::from_str(&response.body).expect("body should be JSON");
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["requestId"], "abc-123");
    }

    #[test]
    fn direct_success_omits_otel_flag() {
        let handler = HelloHandler::new(HandlerSettings::default().with_otel_enabled(true));
        let response = handler.handle_direct(&json!({"key": "value"}), &sample_context());

        let DirectResponse::Success(payload) = response else {
            panic!("direct invocation should succeed");
        };
        assert_eq!(payload.otel_enabled, None);
        assert_eq!(payload.function_version, "$LATEST");
    }

    #[test]
    fn direct_failure_returns_bare_error() {
        let handler = HelloHandler::with_encoder(HandlerSettings::default(), FailingEncoder);
        let response = handler.handle_direct(&json!("anything"), &sample_context());

        assert_eq!(
            serde_json::to_value(&response).expect("response should serialize"),
            json!({"error": "Internal server error"})
        );
    }
}
