use hello_lambda_core::handler::{HandlerSettings, HelloHandler, InvocationHandler};
use hello_lambda_core::instrumented::{InstrumentedHandler, TelemetryLabels};
use hello_lambda_core::metrics::MetricsSink;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use crate::adapters::context::invocation_context_from_lambda;
use crate::adapters::emf::EmfMetricsSink;
use crate::config::LambdaConfig;
use crate::handlers::routing::{handle_event, EntryPoint};
use crate::logging::init_logging;

pub fn build_handler(config: &LambdaConfig) -> Box<dyn InvocationHandler> {
    build_handler_with_sink(config, EmfMetricsSink::stdout(&config.metrics_namespace))
}

/// Metrics disabled means the bare handler; the sink is dropped unused.
pub fn build_handler_with_sink<S: MetricsSink + 'static>(
    config: &LambdaConfig,
    sink: S,
) -> Box<dyn InvocationHandler> {
    let settings = HandlerSettings::default().with_otel_enabled(config.metrics_enabled);
    let handler = HelloHandler::new(settings);
    if !config.metrics_enabled {
        return Box::new(handler);
    }

    let labels = TelemetryLabels {
        runtime: handler.settings().runtime.clone(),
        environment: config.environment.clone(),
    };
    Box::new(InstrumentedHandler::new(handler, sink, labels))
}

/// Cold-start wiring shared by every binary: logging, config, handler, runtime loop.
pub async fn serve(entry_point: EntryPoint) -> Result<(), Error> {
    init_logging()?;
    let config = LambdaConfig::from_env()?;
    info!(
        ?entry_point,
        metrics_enabled = config.metrics_enabled,
        environment = %config.environment,
        "handler initialized"
    );

    let handler = build_handler(&config);
    let handler = handler.as_ref();

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        let context = invocation_context_from_lambda(&event.context);
        let response = handle_event(handler, entry_point, &event.payload, &context)?;
        Ok::<Value, Error>(response)
    }))
    .await
}
