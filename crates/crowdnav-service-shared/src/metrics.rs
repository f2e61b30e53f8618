//! Prometheus metrics infrastructure.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for `/metrics` endpoint
//! - Business metric helpers for routing, venue configuration and analysis ingestion
//!
//! # Example
//!
//! ```no_run
//! use crowdnav_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//! use axum::{routing::get, Router};
//!
//! init_metrics(&MetricsConfig::default()).expect("failed to initialize metrics");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED`: anything but "false" keeps metrics on.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        Self { enabled }
    }
}

/// Install the Prometheus recorder. Only the first successful call wins.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// `None` until [`init_metrics`] succeeded.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the `/metrics` endpoint, in Prometheus exposition format.
pub async fn metrics_handler() -> String {
    prometheus_handle()
        .map(PrometheusHandle::render)
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Increments `crowdnav_routes_calculated_total`.
///
/// `avoiding` tells whether the request carried a non-empty avoid list.
pub fn record_route_calculated(avoiding: bool) {
    metrics::counter!(
        "crowdnav_routes_calculated_total",
        "avoiding" => if avoiding { "true" } else { "false" }
    )
    .increment(1);
}

/// Increments `crowdnav_routes_failed_total`.
///
/// `reason` is one of "validation_error", "unknown_zone", "no_path" or "internal_error".
pub fn record_route_failed(reason: &'static str) {
    metrics::counter!("crowdnav_routes_failed_total", "reason" => reason).increment(1);
}

/// Records hop count to the `crowdnav_route_hops` histogram.
pub fn record_route_hops(hops: usize) {
    metrics::histogram!("crowdnav_route_hops").record(hops as f64);
}

/// Increments `crowdnav_venues_configured_total` for `layout` ("auto" or "custom").
pub fn record_venue_configured(layout: &'static str) {
    metrics::counter!("crowdnav_venues_configured_total", "layout" => layout).increment(1);
}

/// Increments `crowdnav_events_selected_total`.
pub fn record_event_selected() {
    metrics::counter!("crowdnav_events_selected_total").increment(1);
}

/// Increments `crowdnav_analyses_ingested_total` for the reported density level.
pub fn record_analysis_ingested(density: &'static str) {
    metrics::counter!("crowdnav_analyses_ingested_total", "density" => density).increment(1);
}

/// Increments `crowdnav_messages_posted_total`.
pub fn record_message_posted() {
    metrics::counter!("crowdnav_messages_posted_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        assert!(MetricsConfig::default().enabled);
    }

    #[test]
    fn test_metrics_config_from_lookup() {
        let off = MetricsConfig::from_lookup(|_| Some("FALSE".to_string()));
        assert!(!off.enabled);

        let on = MetricsConfig::from_lookup(|_| None);
        assert!(on.enabled);
    }

    #[test]
    fn test_init_metrics_disabled() {
        let err = init_metrics(&MetricsConfig { enabled: false }).unwrap_err();
        assert_eq!(err, MetricsError::Disabled);
    }

    #[tokio::test]
    async fn test_metrics_handler_returns_prometheus_format() {
        // The recorder is global; another test may or may not have installed it.
        let output = metrics_handler().await;
        assert!(output.contains('#') || output.is_empty());
    }

    #[test]
    fn test_business_metric_helpers_do_not_panic() {
        record_route_calculated(true);
        record_route_calculated(false);
        record_route_failed("no_path");
        record_route_hops(3);
        record_venue_configured("auto");
        record_event_selected();
        record_analysis_ingested("High");
        record_message_posted();
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
