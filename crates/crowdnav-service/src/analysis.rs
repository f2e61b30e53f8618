//! Zone analysis ingestion and crowd density read-outs.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crowdnav_lib::{ActiveAnomaly, DensityLevel, ZoneDensity};
use crowdnav_service_shared::{
    json_body, record_analysis_ingested, AppState, ProblemDetails, RequestId, ServiceResponse,
    Validate, ZoneAnalysisRequest,
};

const NO_DATA_MESSAGE: &str = "No analysis available. Please upload video.";

#[derive(Debug, Serialize)]
pub(crate) struct IngestResponse {
    message: String,
    zone_id: String,
    density_level: DensityLevel,
    anomalies: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct NoData {
    zone_id: String,
    status: &'static str,
    message: &'static str,
}

/// Density view, or a `no_data` marker for zones nobody has analysed yet.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum DensityResponse {
    Analysed(ZoneDensity),
    NoData(NoData),
}

impl IntoResponse for DensityResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `POST /api/zones/{zone_id}/analysis`: store the analyzer's latest record.
pub(crate) async fn ingest_analysis(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
    request_id: RequestId,
    payload: Result<Json<ZoneAnalysisRequest>, JsonRejection>,
) -> Result<ServiceResponse<IngestResponse>, Box<ProblemDetails>> {
    let request = json_body(payload, request_id.as_str())?;
    request.validate(request_id.as_str())?;

    let ZoneAnalysisRequest(analysis) = request;
    let density_level = analysis.density_level;
    let anomalies = analysis.anomalies.len();
    info!(
        zone_id = %zone_id,
        crowd_count = analysis.crowd_count,
        density = density_level.as_str(),
        anomalies,
        "zone analysis received"
    );

    state.analyses().record(zone_id.clone(), analysis);
    record_analysis_ingested(density_level.as_str());

    Ok(ServiceResponse::new(IngestResponse {
        message: format!("Analysis stored for zone '{zone_id}'"),
        zone_id,
        density_level,
        anomalies,
    })
    .with_status(StatusCode::CREATED))
}

/// `GET /api/zones/{zone_id}/density`
pub(crate) async fn zone_density(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> DensityResponse {
    match state.analyses().density(&zone_id) {
        Some(density) => DensityResponse::Analysed(density),
        None => DensityResponse::NoData(NoData {
            zone_id,
            status: "no_data",
            message: NO_DATA_MESSAGE,
        }),
    }
}

/// `GET /api/anomalies/active`
pub(crate) async fn active_anomalies(State(state): State<AppState>) -> Json<Vec<ActiveAnomaly>> {
    Json(state.analyses().active_anomalies())
}
