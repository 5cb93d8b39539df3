#![warn(missing_docs)]
//! An HTTP bridge that loads callback scripts on request and invokes named functions from them, built for external test harnesses.

pub mod cmd;
pub mod config;
pub mod engine;
pub mod http_server;
pub mod metrics;
pub mod models;
