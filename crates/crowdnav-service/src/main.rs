//! CrowdNav venue navigation HTTP service.
//!
//! Configures event venues, plans crowd-aware routes between zones,
//! collects per-zone crowd analyses and relays responder messages.
//!
//! # Endpoints
//!
//! - `POST /api/events/preview-zones` - Auto-zone an area without saving it
//! - `POST /api/events/create` - Register an event and activate its venue
//! - `GET /api/events` - List registered events
//! - `POST /api/events/select` - Re-activate a registered event's venue
//! - `GET /api/venue` - Active venue zones and edge count
//! - `POST /api/path/calculate` - Route with turn-by-turn guidance
//! - `POST /api/zones/{zone_id}/analysis` - Ingest analyzer output
//! - `GET /api/zones/{zone_id}/density` - Latest crowd density for a zone
//! - `GET /api/anomalies/active` - Anomalies across all zones
//! - `GET /api/messages`, `POST /api/messages` - Responder message board
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness check
//! - `GET /health/ready` - Kubernetes readiness check
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `CROWDNAV_EVENTS_PATH` - JSON file persisting the event registry (optional)
//! - `CROWDNAV_DEFAULT_RADIUS_M` - Auto-zoning radius in meters (default: 500)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Set to `false` to disable the Prometheus recorder

use std::net::SocketAddr;

use tracing::{error, info, warn};

use crowdnav_service::router;
use crowdnav_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("crowdnav");
    init_logging(&logging_config);

    // Metrics are optional; keep serving without them.
    if let Err(e) = init_metrics(&MetricsConfig::from_env()) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env().map_err(|e| {
        error!(error = %e, "invalid service configuration");
        e
    })?;

    info!(
        port = config.port,
        events_path = ?config.events_path,
        default_radius_m = config.default_radius_m,
        "starting crowdnav service"
    );

    let state = AppState::from_config(&config).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    info!(state = ?state, "application state loaded");

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal");
}
