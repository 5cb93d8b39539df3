//! Shared runtime counters surfaced by the `/status` endpoint.

use std::sync::Arc;

use tokio::sync::RwLock;

/// A struct to hold bridge runtime metrics.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// The time the application started.
    pub start_time: tokio::time::Instant,
    /// The number of invocation requests handled.
    pub invocations: u64,
    /// The number of invocation requests that ended in a bridge error.
    pub failures: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self { start_time: tokio::time::Instant::now(), invocations: 0, failures: 0 }
    }
}

/// Shared application metrics for the HTTP server.
#[derive(Clone, Default)]
pub struct AppMetrics {
    /// Shared metrics.
    pub metrics: Arc<RwLock<Metrics>>,
}

impl AppMetrics {
    /// Records one handled invocation and whether it failed.
    pub async fn record_invocation(&self, failed: bool) {
        let mut metrics = self.metrics.write().await;
        metrics.invocations += 1;
        if failed {
            metrics.failures += 1;
        }
    }
}
