//! Lambda runtime integration for the hello-world handler.
//!
//! This crate owns everything that touches the process: environment
//! configuration, log subscriber setup, the runtime context adapter, the
//! Embedded Metric Format sink and event routing. Handler semantics live in
//! `hello_lambda_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
