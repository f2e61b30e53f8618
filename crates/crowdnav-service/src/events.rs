//! Event management handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crowdnav_lib::{ConfiguredEvent, Coordinate, Event, NewEvent, Zone};
use crowdnav_service_shared::{
    from_lib_error, json_body, record_event_selected, record_venue_configured, AppState,
    CreateEventRequest, PreviewZonesRequest, ProblemDetails, RequestId, SelectEventRequest,
    Validate,
};

type HandlerResult<T> = Result<Json<T>, Box<ProblemDetails>>;

#[derive(Debug, Serialize)]
pub(crate) struct ConfiguredZone {
    id: String,
    name: String,
    center: Coordinate,
}

impl From<&Zone> for ConfiguredZone {
    fn from(zone: &Zone) -> Self {
        Self {
            id: zone.id(),
            name: zone.name.clone(),
            center: zone.coordinate,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateEventResponse {
    message: String,
    event_id: String,
    zones: Vec<ConfiguredZone>,
    navigation_graph_updated: bool,
}

/// Registry entry with its venue zones; the graph is summarised by edge count.
#[derive(Debug, Serialize)]
pub(crate) struct EventSummary {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organizer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<String>,
    zone_count: usize,
    edge_count: usize,
    zones: Vec<Zone>,
}

impl From<Event> for EventSummary {
    fn from(event: Event) -> Self {
        Self {
            zone_count: event.venue.zones().len(),
            edge_count: event.venue.graph().edge_count(),
            zones: event.venue.zones().to_vec(),
            id: event.id,
            name: event.name,
            location: event.location,
            date: event.date,
            event_type: event.event_type,
            description: event.description,
            organizer: event.organizer,
            contact: event.contact,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SelectEventResponse {
    message: String,
    active: bool,
}

/// `POST /api/events/preview-zones`: auto-zoning without side effects.
pub(crate) async fn preview_zones(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<PreviewZonesRequest>, JsonRejection>,
) -> HandlerResult<Vec<Zone>> {
    let request = json_body(payload, request_id.as_str())?;
    request.validate(request_id.as_str())?;

    let center = request.location.ok_or_else(|| {
        Box::new(ProblemDetails::bad_request(
            "The 'location' field is required",
            request_id.as_str(),
        ))
    })?;

    let zones = state
        .events()
        .preview(center, request.radius)
        .map_err(|e| Box::new(from_lib_error(&e, request_id.as_str())))?;

    Ok(Json(zones))
}

/// `POST /api/events/create`: register an event and activate its venue.
pub(crate) async fn create_event(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> HandlerResult<CreateEventResponse> {
    let request = json_body(payload, request_id.as_str())?;
    request.validate(request_id.as_str())?;

    let ConfiguredEvent { event, layout } = state
        .events()
        .configure(state.venues(), NewEvent::from(request))
        .map_err(|e| {
            warn!(error = %e, "event configuration rejected");
            Box::new(from_lib_error(&e, request_id.as_str()))
        })?;
    record_venue_configured(layout);

    let zones: Vec<ConfiguredZone> = event.venue.zones().iter().map(ConfiguredZone::from).collect();
    info!(
        event_id = %event.id,
        layout,
        zones = zones.len(),
        "venue reconfigured"
    );

    Ok(Json(CreateEventResponse {
        message: format!(
            "Event '{}' configured. Area divided into {} zones.",
            event.name,
            zones.len()
        ),
        event_id: event.id,
        zones,
        navigation_graph_updated: true,
    }))
}

/// `GET /api/events`
pub(crate) async fn list_events(State(state): State<AppState>) -> Json<Vec<EventSummary>> {
    Json(
        state
            .events()
            .list()
            .into_iter()
            .map(EventSummary::from)
            .collect(),
    )
}

/// `POST /api/events/select`: swap a registered event's venue back in.
pub(crate) async fn select_event(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<SelectEventRequest>, JsonRejection>,
) -> HandlerResult<SelectEventResponse> {
    let request = json_body(payload, request_id.as_str())?;
    request.validate(request_id.as_str())?;

    let event = state
        .events()
        .select(state.venues(), &request.event_id)
        .map_err(|e| Box::new(from_lib_error(&e, request_id.as_str())))?;
    record_event_selected();

    Ok(Json(SelectEventResponse {
        message: format!("Event '{}' selected", event.name),
        active: true,
    }))
}
