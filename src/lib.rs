//! Core library for the `apibench` CLI.
//!
//! `apibench` drives a chart data API server (`/api/symbols`, `/api/status`,
//! `/api/data`) under bounded concurrent load, summarises latency and
//! throughput, stores each run as a timestamped JSON record, and compares
//! new runs against a baseline and recent history. The binary is the
//! primary interface; the modules below are its building blocks.
pub mod app;
pub mod args;
pub mod compare;
pub mod config;
pub mod driver;
pub mod entry;
pub mod error;
pub mod functional;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod scenario;
pub mod shutdown;
pub mod store;
