//! Server metrics.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use prometheus::{IntCounter, IntCounterVec, Opts};

use crate::{Result, ServerError};

/// Metrics namespace.
pub const METRICS_NAMESPACE: &str = "bailiff";
/// Label recorded for pipeline failures.
pub const UNKNOWN_RESULT: &str = "unknown";
/// Label recorded for authorized pull requests.
pub const SUCCESS_RESULT: &str = "success";

/// Application counters, shared by every worker.
#[derive(Clone)]
pub struct ServerMetrics {
    /// Received webhooks, by event type.
    pub received_webhooks: IntCounterVec,
    /// Processed pull requests, by result.
    pub processed_prs: IntCounterVec,
    /// GitHub API calls.
    pub github_api_calls: IntCounter,
}

impl ServerMetrics {
    /// Create unregistered counters.
    pub fn new() -> Result<Self> {
        Ok(Self {
            received_webhooks: IntCounterVec::new(
                Opts::new("received_webhooks_total", "Received webhooks")
                    .namespace(METRICS_NAMESPACE),
                &["event"],
            )
            .map_err(metrics_error)?,
            processed_prs: IntCounterVec::new(
                Opts::new("processed_prs_total", "Processed pull requests")
                    .namespace(METRICS_NAMESPACE),
                &["result"],
            )
            .map_err(metrics_error)?,
            github_api_calls: IntCounter::with_opts(
                Opts::new("github_api_calls_total", "GitHub API calls")
                    .namespace(METRICS_NAMESPACE),
            )
            .map_err(metrics_error)?,
        })
    }

    /// Record a received webhook.
    pub fn record_received_webhook(&self, event_type: &str) {
        self.received_webhooks
            .with_label_values(&[event_type])
            .inc();
    }

    /// Record a processed pull request.
    pub fn record_processed_pr(&self, result: &str) {
        self.processed_prs.with_label_values(&[result]).inc();
    }
}

/// Build the Prometheus middleware, serving `/metrics`.
pub fn build_metrics_handler(metrics: &ServerMetrics) -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .endpoint("/metrics")
        .build()
        .map_err(|e| ServerError::MetricsError { source: e })?;

    setup_process_metrics(&prometheus)?;

    let registry = &prometheus.registry;
    registry
        .register(Box::new(metrics.received_webhooks.clone()))
        .map_err(metrics_error)?;
    registry
        .register(Box::new(metrics.processed_prs.clone()))
        .map_err(metrics_error)?;
    registry
        .register(Box::new(metrics.github_api_calls.clone()))
        .map_err(metrics_error)?;

    Ok(prometheus)
}

fn metrics_error(e: prometheus::Error) -> ServerError {
    ServerError::MetricsError {
        source: Box::new(e),
    }
}

#[cfg(target_os = "linux")]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    metrics
        .registry
        .register(Box::new(ProcessCollector::for_self()))
        .map_err(metrics_error)
}

#[cfg(not(target_os = "linux"))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    Ok(())
}
