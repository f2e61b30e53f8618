//! CrowdNav venue navigation HTTP service.
//!
//! The binary in `main.rs` only wires configuration, logging and the
//! listener; everything reachable over HTTP is assembled by [`router`] so
//! integration tests can drive it in-process.

#![deny(warnings)]

mod analysis;
mod events;
mod messages;
mod navigation;

use axum::routing::{get, post};
use axum::{middleware, Router};

use crowdnav_service_shared::middleware::trace_layer;
use crowdnav_service_shared::{
    cors_layer, health_live, health_ready, metrics_handler, track_request, AppState,
};

/// Build the complete application router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/events/preview-zones", post(events::preview_zones))
        .route("/api/events/create", post(events::create_event))
        .route("/api/events", get(events::list_events))
        .route("/api/events/select", post(events::select_event))
        .route("/api/venue", get(navigation::active_venue))
        .route("/api/path/calculate", post(navigation::calculate_path))
        .route(
            "/api/zones/{zone_id}/analysis",
            post(analysis::ingest_analysis),
        )
        // Older dashboards poll density with POST.
        .route(
            "/api/zones/{zone_id}/density",
            get(analysis::zone_density).post(analysis::zone_density),
        )
        .route("/api/anomalies/active", get(analysis::active_anomalies))
        .route(
            "/api/messages",
            get(messages::list_messages).post(messages::post_message),
        )
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(middleware::from_fn(track_request))
        .layer(trace_layer())
        .layer(cors_layer())
        .with_state(state)
}
