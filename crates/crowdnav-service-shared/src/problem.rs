//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crowdnav_lib::Error as LibError;

/// Problem type URI for zone names missing from the active venue.
pub const PROBLEM_UNKNOWN_ZONE: &str = "/problems/unknown-zone";

/// Problem type URI for routes that cannot be found.
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";

/// Problem type URI for event ids missing from the registry.
pub const PROBLEM_UNKNOWN_EVENT: &str = "/problems/unknown-event";

/// Problem type URI for rejected venue configurations.
pub const PROBLEM_INVALID_VENUE: &str = "/problems/invalid-venue";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use crowdnav_service_shared::{ProblemDetails, PROBLEM_UNKNOWN_ZONE};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_UNKNOWN_ZONE,
///     "Unknown Zone",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("Zone 'Main Stag' not found. Did you mean: Main Stage?")
/// .with_request_id("req-12345");
/// assert_eq!(problem.status, 404);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    pub status: u16,

    /// Explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request identifier of the failing call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Always "application/problem+json".
    pub content_type: String,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for malformed or incomplete request bodies.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 400 for venue configurations the library refused to build.
    pub fn invalid_venue(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_VENUE,
            "Invalid Venue Configuration",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 for zone names the active venue does not know.
    pub fn unknown_zone(name: &str, suggestions: &[String], request_id: impl Into<String>) -> Self {
        let detail = if suggestions.is_empty() {
            format!("Zone '{}' not found", name)
        } else {
            format!(
                "Zone '{}' not found. Did you mean: {}?",
                name,
                suggestions.join(", ")
            )
        };

        Self::new(PROBLEM_UNKNOWN_ZONE, "Unknown Zone", StatusCode::NOT_FOUND)
            .with_detail(detail)
            .with_request_id(request_id)
    }

    /// 404 for zone pairs with no connecting route.
    pub fn route_not_found(start: &str, end: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_ROUTE_NOT_FOUND,
            "Route Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No route exists from '{}' to '{}'", start, end))
        .with_request_id(request_id)
    }

    /// 404 for event ids missing from the registry.
    pub fn unknown_event(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_UNKNOWN_EVENT, "Event Not Found", StatusCode::NOT_FOUND)
            .with_detail(format!("Event '{}' not found", id))
            .with_request_id(request_id)
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

impl IntoResponse for Box<ProblemDetails> {
    fn into_response(self) -> Response {
        (*self).into_response()
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownZone { name, suggestions } => {
            ProblemDetails::unknown_zone(name, suggestions, request_id)
        }
        LibError::RouteNotFound { start, end } => {
            ProblemDetails::route_not_found(start, end, request_id)
        }
        LibError::UnknownEvent { id } => ProblemDetails::unknown_event(id, request_id),
        LibError::InvalidVenueConfig { message } => {
            ProblemDetails::invalid_venue(message.clone(), request_id)
        }
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}
