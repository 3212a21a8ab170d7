use std::collections::BTreeMap;
use std::sync::Arc;

pub const INVOCATIONS_TOTAL: &str = "lambda_invocations_total";
pub const STATUS_TOTAL: &str = "lambda_status_total";
pub const HELLO_WORLD_REQUESTS_TOTAL: &str = "hello_world_requests_total";
pub const DURATION_SECONDS: &str = "lambda_duration_seconds";

pub const ATTR_RUNTIME: &str = "runtime";
pub const ATTR_FUNCTION_NAME: &str = "function_name";
pub const ATTR_FUNCTION_VERSION: &str = "function_version";
pub const ATTR_STATUS: &str = "status";
pub const ATTR_ENVIRONMENT: &str = "environment";

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

pub type MetricAttributes = BTreeMap<&'static str, String>;

/// Write-only telemetry capability handed to the instrumented handler.
///
/// Implementations must tolerate concurrent calls and must not report
/// failures back to the caller; a sink that cannot deliver drops the sample.
pub trait MetricsSink: Send + Sync {
    fn increment_counter(&self, name: &str, attributes: &MetricAttributes);

    fn record_histogram(&self, name: &str, value: f64, attributes: &MetricAttributes);
}

impl<S: MetricsSink + ?Sized> MetricsSink for Arc<S> {
    fn increment_counter(&self, name: &str, attributes: &MetricAttributes) {
        (**self).increment_counter(name, attributes);
    }

    fn record_histogram(&self, name: &str, value: f64, attributes: &MetricAttributes) {
        (**self).record_histogram(name, value, attributes);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn increment_counter(&self, _name: &str, _attributes: &MetricAttributes) {}

    fn record_histogram(&self, _name: &str, _value: f64, _attributes: &MetricAttributes) {}
}

#[cfg(any(test, feature = "test-helpers"))]
pub use recording::{RecordedMetric, RecordingMetricsSink};

#[cfg(any(test, feature = "test-helpers"))]
mod recording {
    use std::sync::Mutex;

    use super::{MetricAttributes, MetricsSink};

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedMetric {
        Counter {
            name: String,
            attributes: MetricAttributes,
        },
        Histogram {
            name: String,
            value: f64,
            attributes: MetricAttributes,
        },
    }

    impl RecordedMetric {
        pub fn name(&self) -> &str {
            match self {
                Self::Counter { name, .. } | Self::Histogram { name, .. } => name,
            }
        }

        pub fn attributes(&self) -> &MetricAttributes {
            match self {
                Self::Counter { attributes, .. } | Self::Histogram { attributes, .. } => {
                    attributes
                }
            }
        }
    }

    /// Keeps every emission in order so tests can assert on them.
    #[derive(Debug, Default)]
    pub struct RecordingMetricsSink {
        emissions: Mutex<Vec<RecordedMetric>>,
    }

    impl RecordingMetricsSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn emissions(&self) -> Vec<RecordedMetric> {
            self.emissions.lock().expect("poisoned mutex").clone()
        }

        pub fn named(&self, name: &str) -> Vec<RecordedMetric> {
            self.emissions()
                .into_iter()
                .filter(|metric| metric.name() == name)
                .collect()
        }
    }

    impl MetricsSink for RecordingMetricsSink {
        fn increment_counter(&self, name: &str, attributes: &MetricAttributes) {
            self.emissions
                .lock()
                .expect("poisoned mutex")
                .push(RecordedMetric::Counter {
                    name: name.to_string(),
                    attributes: attributes.clone(),
                });
        }

        fn record_histogram(&self, name: &str, value: f64, attributes: &MetricAttributes) {
            self.emissions
                .lock()
                .expect("poisoned mutex")
                .push(RecordedMetric::Histogram {
                    name: name.to_string(),
                    value,
                    attributes: attributes.clone(),
                });
        }
    }
}
