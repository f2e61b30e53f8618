//! Health check handlers for liveness and readiness checks.
//!
//! `/health/live` only proves the process answers; `/health/ready` also
//! reports the size of the active venue and the event registry.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: {reason}".
    pub status: String,

    pub service: String,

    pub version: String,

    /// RFC 3339 time the health check was answered.
    pub checked_at: String,

    /// Zones in the active venue (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones_loaded: Option<usize>,

    /// Registered events (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_registered: Option<usize>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            checked_at: now(),
            zones_loaded: None,
            events_registered: None,
        }
    }

    pub fn ready(service: &str, version: &str, zones: usize, events: usize) -> Self {
        Self {
            zones_loaded: Some(zones),
            events_registered: Some(events),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// Liveness check handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"crowdnav-service-shared","version":"0.1.0","checked_at":"..."}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness check handler.
///
/// Answers 503 while the active venue has no zones, since no route can be
/// planned against it.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let zones = state.venues().snapshot().graph().zone_count();
    let events = state.events().len();

    if zones == 0 {
        let status = HealthStatus::not_ready(service, version, "active venue has no zones");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, zones, events);
    (StatusCode::OK, Json(status)).into_response()
}
