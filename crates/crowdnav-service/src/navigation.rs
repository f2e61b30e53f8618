//! Venue inspection and route calculation handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{debug, error, info};

use crowdnav_lib::{plan_route, Error as LibError, NavigationSummary, RouteRequest, Zone};
use crowdnav_service_shared::{
    from_lib_error, json_body, record_route_calculated, record_route_failed, record_route_hops,
    AppState, PathRequest, ProblemDetails, RequestId, ServiceResponse, Validate,
};

#[derive(Debug, Serialize)]
pub(crate) struct VenueResponse {
    zones: Vec<Zone>,
    zone_count: usize,
    edge_count: usize,
}

/// `GET /api/venue`: the active venue's zones and directed edge count.
pub(crate) async fn active_venue(State(state): State<AppState>) -> Json<VenueResponse> {
    let venue = state.venues().snapshot();
    Json(VenueResponse {
        zones: venue.zones().to_vec(),
        zone_count: venue.graph().zone_count(),
        edge_count: venue.graph().edge_count(),
    })
}

fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::UnknownZone { .. } => "unknown_zone",
        LibError::RouteNotFound { .. } => "no_path",
        _ => "internal_error",
    }
}

/// `POST /api/path/calculate`
///
/// Plans against one venue snapshot, so a concurrent reconfiguration can't
/// mix coordinates from two venues into the same response.
pub(crate) async fn calculate_path(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<PathRequest>, JsonRejection>,
) -> Result<ServiceResponse<NavigationSummary>, Box<ProblemDetails>> {
    let request = json_body(payload, request_id.as_str()).inspect_err(|_| {
        record_route_failed("validation_error");
    })?;

    info!(
        start = %request.start,
        end = %request.end,
        avoid = ?request.avoid,
        "handling path request"
    );

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_route_failed("validation_error");
        return Err(problem);
    }

    let venue = state.venues().snapshot();
    let lib_request = RouteRequest::from(request);

    let summary = plan_route(&venue, &lib_request)
        .and_then(|plan| NavigationSummary::from_plan(&venue, &plan))
        .map_err(|e| {
            error!(error = %e, "route planning failed");
            record_route_failed(failure_reason(&e));
            Box::new(from_lib_error(&e, request_id.as_str()))
        })?;

    record_route_calculated(!lib_request.avoid.is_empty());
    record_route_hops(summary.hops());
    debug!(route = %summary.render_plain(), "route guidance");
    info!(
        hops = summary.hops(),
        distance_m = summary.total_distance_meters,
        eta_min = summary.estimated_time_minutes,
        "route computed successfully"
    );

    Ok(ServiceResponse::new(summary))
}
