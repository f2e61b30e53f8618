//! Responder message board handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crowdnav_lib::Message;
use crowdnav_service_shared::{
    json_body, record_message_posted, AppState, PostMessageRequest, ProblemDetails, RequestId,
    Validate,
};

#[derive(Debug, Serialize)]
pub(crate) struct PostMessageResponse {
    status: &'static str,
    message: Message,
}

/// `POST /api/messages`
pub(crate) async fn post_message(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<Json<PostMessageResponse>, Box<ProblemDetails>> {
    let request = json_body(payload, request_id.as_str())?;
    request.validate(request_id.as_str())?;

    let PostMessageRequest(body) = request;
    let message = state.messages().post(body);
    record_message_posted();
    info!(message_id = %message.id, "message posted");

    Ok(Json(PostMessageResponse {
        status: "sent",
        message,
    }))
}

/// `GET /api/messages`: every message in posting order.
pub(crate) async fn list_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    Json(state.messages().list())
}
