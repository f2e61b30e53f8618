//! Request types and validation for HTTP endpoints.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crowdnav_lib::{Coordinate, NewEvent, RouteRequest, Zone, ZoneAnalysis};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` populates the `instance` field of any returned
    /// `ProblemDetails`. The error is boxed to keep `Result::Err` small.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Unwrap a JSON body, turning axum's plain-text rejection into a 400 problem.
pub fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    request_id: &str,
) -> Result<T, Box<ProblemDetails>> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        Box::new(ProblemDetails::bad_request(
            format!("Malformed JSON body: {}", rejection.body_text()),
            request_id,
        ))
    })
}

fn required(field: &str, value: &str, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    if value.trim().is_empty() {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{field}' field is required and cannot be empty"),
            request_id,
        )));
    }
    Ok(())
}

fn valid_location(location: &Coordinate, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    if !location.is_valid() {
        return Err(Box::new(ProblemDetails::bad_request(
            "The 'location' field must hold a latitude within ±90 and a longitude within ±180",
            request_id,
        )));
    }
    Ok(())
}

fn valid_radius(radius: Option<f64>, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    match radius {
        Some(radius) if !radius.is_finite() || radius <= 0.0 => {
            Err(Box::new(ProblemDetails::bad_request(
                "The 'radius' field must be a positive number of meters",
                request_id,
            )))
        }
        _ => Ok(()),
    }
}

/// Body of `POST /api/events/preview-zones`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewZonesRequest {
    #[serde(default)]
    pub location: Option<Coordinate>,
    /// Meters; the service default applies when omitted.
    #[serde(default)]
    pub radius: Option<f64>,
}

impl Validate for PreviewZonesRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        let Some(location) = &self.location else {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'location' field is required",
                request_id,
            )));
        };
        valid_location(location, request_id)?;
        valid_radius(self.radius, request_id)
    }
}

/// Body of `POST /api/events/create`.
///
/// A non-empty `zones` list wins over `location`/`radius`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<Coordinate>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub zones: Option<Vec<Zone>>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl CreateEventRequest {
    fn has_custom_zones(&self) -> bool {
        self.zones.as_ref().is_some_and(|zones| !zones.is_empty())
    }
}

impl Validate for CreateEventRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        required("name", &self.name, request_id)?;
        if self.has_custom_zones() {
            return Ok(());
        }

        match &self.location {
            Some(location) => valid_location(location, request_id)?,
            None => {
                return Err(Box::new(ProblemDetails::bad_request(
                    "Either a non-empty 'zones' list or a 'location' is required",
                    request_id,
                )))
            }
        }
        valid_radius(self.radius, request_id)
    }
}

impl From<CreateEventRequest> for NewEvent {
    fn from(request: CreateEventRequest) -> Self {
        NewEvent {
            name: request.name,
            location: request.location,
            radius_m: request.radius,
            zones: request.zones,
            date: request.date,
            event_type: request.event_type,
            description: request.description,
            organizer: request.organizer,
            contact: request.contact,
        }
    }
}

/// Body of `POST /api/events/select`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectEventRequest {
    #[serde(default)]
    pub event_id: String,
}

impl Validate for SelectEventRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        required("event_id", &self.event_id, request_id)
    }
}

/// Zone a path request starts from when the body names none.
pub const DEFAULT_PATH_START: &str = "Entrance";

/// Zone a path request heads to when the body names none.
pub const DEFAULT_PATH_END: &str = "Main Stage";

fn default_path_start() -> String {
    DEFAULT_PATH_START.to_string()
}

fn default_path_end() -> String {
    DEFAULT_PATH_END.to_string()
}

/// Body of `POST /api/path/calculate`.
///
/// Omitted endpoints fall back to the entrance and the main stage; endpoints
/// sent as blank strings are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRequest {
    #[serde(default = "default_path_start")]
    pub start: String,
    #[serde(default = "default_path_end")]
    pub end: String,
    /// Zones to steer around; names the venue doesn't know are ignored.
    #[serde(default)]
    pub avoid: Vec<String>,
}

impl Validate for PathRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        required("start", &self.start, request_id)?;
        required("end", &self.end, request_id)
    }
}

impl From<PathRequest> for RouteRequest {
    fn from(request: PathRequest) -> Self {
        RouteRequest::new(request.start, request.end).avoiding(request.avoid)
    }
}

/// Body of `POST /api/zones/{zone_id}/analysis`: one analyzer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneAnalysisRequest(pub ZoneAnalysis);

impl Validate for ZoneAnalysisRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if let Some(anomaly) = self.0.anomalies.iter().find(|a| a.description.trim().is_empty()) {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("Anomaly of type '{}' has no description", anomaly.kind),
                request_id,
            )));
        }
        Ok(())
    }
}

/// Body of `POST /api/messages`: any JSON object carrying a non-blank `text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostMessageRequest(pub Map<String, Value>);

impl Validate for PostMessageRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        match self.0.get("text") {
            Some(Value::String(text)) => required("text", text, request_id),
            _ => Err(Box::new(ProblemDetails::bad_request(
                "The 'text' field is required and must be a string",
                request_id,
            ))),
        }
    }
}
