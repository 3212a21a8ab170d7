mod support;

use std::sync::Arc;
use std::thread;

use hello_lambda_core::handler::{HandlerSettings, HelloHandler, InvocationHandler};
use hello_lambda_core::instrumented::{InstrumentedHandler, TelemetryLabels};
use hello_lambda_core::metrics::{
    RecordingMetricsSink, ATTR_STATUS, DURATION_SECONDS, HELLO_WORLD_REQUESTS_TOTAL,
    INVOCATIONS_TOTAL, STATUS_SUCCESS, STATUS_TOTAL,
};

use support::{context_with, rest_api_event};

fn labels() -> TelemetryLabels {
    TelemetryLabels {
        runtime: "rust".to_string(),
        environment: "integration".to_string(),
    }
}

#[test]
fn concurrent_invocations_share_one_sink() {
    let sink = Arc::new(RecordingMetricsSink::new());
    let handler = Arc::new(InstrumentedHandler::new(
        HelloHandler::new(HandlerSettings::default().with_otel_enabled(true)),
        sink.clone(),
        labels(),
    ));

    let workers: Vec<_> = (0..8)
        .map(|index| {
            let handler = Arc::clone(&handler);
            thread::spawn(move || {
                let context = context_with(&format!("req-{index}"), 128);
                handler.handle_gateway(&rest_api_event(), &context).status_code
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().expect("worker should not panic"), 200);
    }

    assert_eq!(sink.named(INVOCATIONS_TOTAL).len(), 8);
    assert_eq!(sink.named(HELLO_WORLD_REQUESTS_TOTAL).len(), 8);
    assert_eq!(sink.named(DURATION_SECONDS).len(), 8);
    assert!(sink
        .named(STATUS_TOTAL)
        .iter()
        .all(|metric| metric.attributes()[ATTR_STATUS] == STATUS_SUCCESS));
}

#[test]
fn instrumented_handler_is_usable_as_trait_object() {
    let sink = Arc::new(RecordingMetricsSink::new());
    let handler: Box<dyn InvocationHandler> = Box::new(InstrumentedHandler::new(
        HelloHandler::new(HandlerSettings::default()),
        sink.clone(),
        labels(),
    ));

    let response = handler.handle_direct(&serde_json::json!({}), &context_with("req-x", 256));

    assert!(response.is_success());
    assert_eq!(sink.emissions().len(), 4);
}
