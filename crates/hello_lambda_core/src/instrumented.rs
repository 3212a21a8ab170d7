use std::time::Instant;

use serde_json::Value;

use crate::contract::{ApiGatewayResponse, DirectResponse, InvocationContext};
use crate::handler::InvocationHandler;
use crate::metrics::{
    MetricAttributes, MetricsSink, ATTR_ENVIRONMENT, ATTR_FUNCTION_NAME, ATTR_FUNCTION_VERSION,
    ATTR_RUNTIME, ATTR_STATUS, DURATION_SECONDS, HELLO_WORLD_REQUESTS_TOTAL, INVOCATIONS_TOTAL,
    STATUS_ERROR, STATUS_SUCCESS, STATUS_TOTAL,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryLabels {
    pub runtime: String,
    pub environment: String,
}

/// Wraps a handler and reports invocation, duration and status metrics for it.
pub struct InstrumentedHandler<H, S> {
    inner: H,
    sink: S,
    labels: TelemetryLabels,
}

impl<H: InvocationHandler, S: MetricsSink> InstrumentedHandler<H, S> {
    pub fn new(inner: H, sink: S, labels: TelemetryLabels) -> Self {
        Self {
            inner,
            sink,
            labels,
        }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    fn record_entry(&self, context: &InvocationContext) {
        self.sink.increment_counter(
            INVOCATIONS_TOTAL,
            &MetricAttributes::from([
                (ATTR_RUNTIME, self.labels.runtime.clone()),
                (ATTR_FUNCTION_NAME, context.function_name.clone()),
                (ATTR_FUNCTION_VERSION, context.function_version.clone()),
                (ATTR_ENVIRONMENT, self.labels.environment.clone()),
            ]),
        );
        self.sink.increment_counter(
            HELLO_WORLD_REQUESTS_TOTAL,
            &MetricAttributes::from([
                (ATTR_RUNTIME, self.labels.runtime.clone()),
                (ATTR_ENVIRONMENT, self.labels.environment.clone()),
            ]),
        );
    }

    fn record_outcome(&self, context: &InvocationContext, started_at: Instant, succeeded: bool) {
        let status = if succeeded {
            STATUS_SUCCESS
        } else {
            STATUS_ERROR
        };
        let attributes = MetricAttributes::from([
            (ATTR_RUNTIME, self.labels.runtime.clone()),
            (ATTR_FUNCTION_NAME, context.function_name.clone()),
            (ATTR_STATUS, status.to_string()),
            (ATTR_ENVIRONMENT, self.labels.environment.clone()),
        ]);

        self.sink.record_histogram(
            DURATION_SECONDS,
            started_at.elapsed().as_secs_f64(),
            &attributes,
        );
        self.sink.increment_counter(STATUS_TOTAL, &attributes);
    }
}

impl<H: InvocationHandler, S: MetricsSink> InvocationHandler for InstrumentedHandler<H, S> {
    fn handle_gateway(&self, event: &Value, context: &InvocationContext) -> ApiGatewayResponse {
        let started_at = Instant::now();
        self.record_entry(context);

        let response = self.inner.handle_gateway(event, context);
        self.record_outcome(context, started_at, response.is_success());
        response
    }

    fn handle_direct(&self, input: &Value, context: &InvocationContext) -> DirectResponse {
        let started_at = Instant::now();
        self.record_entry(context);

        let response = self.inner.handle_direct(input, context);
        self.record_outcome(context, started_at, response.is_success());
        response
    }
}
