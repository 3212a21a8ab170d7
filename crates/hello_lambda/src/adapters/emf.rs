//! CloudWatch Embedded Metric Format sink.
//!
//! Each emission becomes one JSON line on the writer (stdout in Lambda), which
//! CloudWatch Logs turns into a metric datapoint without any exporter process.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use chrono::Utc;
use hello_lambda_core::metrics::{MetricAttributes, MetricsSink};
use serde_json::{json, Map, Value};
use tracing::debug;

pub const UNIT_COUNT: &str = "Count";
pub const UNIT_SECONDS: &str = "Seconds";

pub struct EmfMetricsSink<W> {
    namespace: String,
    writer: Mutex<W>,
}

impl EmfMetricsSink<Stdout> {
    pub fn stdout(namespace: impl Into<String>) -> Self {
        Self::new(namespace, io::stdout())
    }
}

impl<W: Write + Send> EmfMetricsSink<W> {
    pub fn new(namespace: impl Into<String>, writer: W) -> Self {
        Self {
            namespace: namespace.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn into_writer(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, name: &str, value: Value, unit: &str, attributes: &MetricAttributes) {
        let record = emf_record(
            &self.namespace,
            name,
            value,
            unit,
            attributes,
            Utc::now().timestamp_millis(),
        );

        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let written = writeln!(writer, "{record}").and_then(|()| writer.flush());
        if let Err(error) = written {
            debug!(metric = name, "dropped metric sample: {error}");
        }
    }
}

impl<W: Write + Send> MetricsSink for EmfMetricsSink<W> {
    fn increment_counter(&self, name: &str, attributes: &MetricAttributes) {
        self.emit(name, Value::from(1), UNIT_COUNT, attributes);
    }

    fn record_histogram(&self, name: &str, value: f64, attributes: &MetricAttributes) {
        self.emit(name, Value::from(value), UNIT_SECONDS, attributes);
    }
}

pub fn emf_record(
    namespace: &str,
    name: &str,
    value: Value,
    unit: &str,
    attributes: &MetricAttributes,
    timestamp_ms: i64,
) -> Value {
    let dimension_keys: Vec<&str> = attributes.keys().copied().collect();

    let mut record = Map::new();
    record.insert(
        "_aws".to_string(),
        json!({
            "Timestamp": timestamp_ms,
            "CloudWatchMetrics": [{
                "Namespace": namespace,
                "Dimensions": [dimension_keys],
                "Metrics": [{"Name": name, "Unit": unit}],
            }],
        }),
    );
    for (key, attribute) in attributes {
        record.insert((*key).to_string(), Value::from(attribute.as_str()));
    }
    record.insert(name.to_string(), value);
    Value::Object(record)
}
