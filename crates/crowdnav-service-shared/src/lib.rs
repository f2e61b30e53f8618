//! Shared infrastructure for the CrowdNav HTTP service.
//!
//! This crate provides the HTTP glue around `crowdnav-lib`:
//!
//! - [`AppState`]: Active venue, event registry, zone analyses and messages behind one cheap handle
//! - [`ServiceConfig`]: Environment-driven service configuration
//! - [`health`]: Liveness/readiness check handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking, CORS and tracing layers
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; venue modelling, routing and guidance live in
//! `crowdnav-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate parameters                                      │
//! │  - Call crowdnav-lib APIs                                   │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides fixtures for handler testing. Enable
//! the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig, DEFAULT_SERVICE_PORT};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_analysis_ingested, record_event_selected,
    record_message_posted, record_route_calculated, record_route_failed, record_route_hops, record_venue_configured,
    MetricsConfig, MetricsError,
};
pub use middleware::{
    cors_layer, extract_or_generate_request_id, track_request, RequestId, REQUEST_ID_HEADER,
};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_INVALID_VENUE, PROBLEM_ROUTE_NOT_FOUND, PROBLEM_UNKNOWN_EVENT, PROBLEM_UNKNOWN_ZONE,
};
pub use request::{
    json_body, CreateEventRequest, PathRequest, PostMessageRequest, PreviewZonesRequest,
    SelectEventRequest, Validate, ZoneAnalysisRequest, DEFAULT_PATH_END, DEFAULT_PATH_START,
};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
