//! Invocation contract and request handling for the hello-world function.
//!
//! This crate owns the response contract, payload encoding, the metrics sink
//! seam and the handlers themselves. It intentionally excludes the Lambda
//! runtime and any exporter wiring; those live in `hello_lambda`.

pub mod contract;
pub mod encoding;
pub mod handler;
pub mod instrumented;
pub mod metrics;
