use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use crowdnav_service::router;
use crowdnav_service_shared::test_utils::{custom_zones, fixture_zones, test_state, FIXTURE_CENTER};
use crowdnav_service_shared::{
    AppState, ServiceConfig, PROBLEM_INVALID_REQUEST, PROBLEM_UNKNOWN_ZONE,
};

fn server() -> TestServer {
    TestServer::new(router(test_state())).expect("test server")
}

fn server_with(state: AppState) -> TestServer {
    TestServer::new(router(state)).expect("test server")
}

fn content_type(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn calculate_path_returns_guidance() {
    let server = server();

    let response = server
        .post("/api/path/calculate")
        .json(&json!({
            "start": fixture_zones::ENTRANCE,
            "end": fixture_zones::MEDICAL_BAY
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["path_nodes"],
        json!(["Entrance", "Security Gate", "Food Court", "Medical Bay"])
    );
    assert_eq!(body["total_distance_meters"], 1600);
    assert_eq!(body["estimated_time_minutes"], 19);
    assert_eq!(body["instructions"].as_array().map(Vec::len), Some(4));
    assert_eq!(
        body["path_coordinates"][0],
        json!([FIXTURE_CENTER.lat, FIXTURE_CENTER.lng])
    );
    assert_eq!(body["content_type"], "application/json");
}

#[tokio::test]
async fn calculate_path_steers_around_avoided_zone() {
    let server = server();

    let response = server
        .post("/api/path/calculate")
        .json(&json!({
            "start": "Entrance",
            "end": "Medical Bay",
            "avoid": ["Food Court", "Nowhere"]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["path_nodes"],
        json!(["Entrance", "Security Gate", "Main Stage", "Medical Bay"])
    );
    assert_eq!(body["avoid_zones"], json!(["Food Court", "Nowhere"]));
}

#[tokio::test]
async fn unknown_zone_is_a_problem_document() {
    let server = server();

    let response = server
        .post("/api/path/calculate")
        .json(&json!({"start": "Entrance", "end": "Medcal Bay"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(content_type(&response), "application/problem+json");

    let body: Value = response.json();
    assert_eq!(body["type"], PROBLEM_UNKNOWN_ZONE);
    assert!(body["detail"]
        .as_str()
        .unwrap_or_default()
        .contains("Medical Bay"));
    assert!(body["instance"].is_string());
}

#[tokio::test]
async fn omitted_endpoints_default_to_entrance_and_main_stage() {
    let server = server();

    let response = server.post("/api/path/calculate").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["path_nodes"],
        json!(["Entrance", "Security Gate", "Main Stage"])
    );
}

#[tokio::test]
async fn blank_path_fields_are_rejected() {
    let server = server();

    let response = server
        .post("/api/path/calculate")
        .json(&json!({"start": "", "end": "Main Stage"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["type"], PROBLEM_INVALID_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let server = server();

    let response = server
        .post("/api/path/calculate")
        .text("{\"start\": ")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(content_type(&response), "application/problem+json");
    let body: Value = response.json();
    assert_eq!(body["type"], PROBLEM_INVALID_REQUEST);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = server();

    let response = server.get("/api/venue").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    assert_eq!(request_id.len(), 36);
}

#[tokio::test]
async fn venue_lists_default_zones() {
    let server = server();

    let response = server.get("/api/venue").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["zone_count"], 9);
    assert_eq!(body["edge_count"], 22);
    assert_eq!(body["zones"][0]["name"], "Entrance");
}

#[tokio::test]
async fn preview_zones_has_no_side_effects() {
    let state = test_state();
    let server = server_with(state.clone());

    let response = server
        .post("/api/events/preview-zones")
        .json(&json!({"location": {"lat": 51.5, "lng": -0.12}, "radius": 1110}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let zones: Vec<Value> = response.json();
    assert_eq!(zones.len(), 9);
    assert_eq!(zones[0]["name"], "Event Center");
    assert_eq!(zones[0]["lat"], 51.5);

    assert_eq!(state.events().len(), 1);
    assert!(state.venues().snapshot().contains_zone("Entrance"));
}

#[tokio::test]
async fn preview_requires_location() {
    let server = server();

    let response = server
        .post("/api/events/preview-zones")
        .json(&json!({"radius": 300}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_auto_event_activates_generated_venue() {
    let state = test_state();
    let server = server_with(state.clone());

    let response = server
        .post("/api/events/create")
        .json(&json!({
            "name": "Night Market",
            "location": {"lat": 51.5, "lng": -0.12},
            "radius": 800,
            "type": "market"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["event_id"], "evt_night_market");
    assert_eq!(
        body["message"],
        "Event 'Night Market' configured. Area divided into 9 zones."
    );
    assert_eq!(body["navigation_graph_updated"], true);
    assert_eq!(body["zones"][5]["id"], "north_east_sector");
    assert_eq!(body["zones"][0]["center"], json!({"lat": 51.5, "lng": -0.12}));

    let route = server
        .post("/api/path/calculate")
        .json(&json!({"start": "North Zone", "end": "South Zone"}))
        .await;
    assert_eq!(route.status_code(), StatusCode::OK);
    let route: Value = route.json();
    assert_eq!(route["path_nodes"], json!(["North Zone", "South Zone"]));

    assert_eq!(state.venues().snapshot().graph().edge_count(), 72);
}

#[tokio::test]
async fn create_custom_event_uses_supplied_zones() {
    let server = server();

    let response = server
        .post("/api/events/create")
        .json(&json!({"name": "Expo", "zones": custom_zones()}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["zones"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["zones"][0]["id"], "gate_a");

    let stale = server
        .post("/api/path/calculate")
        .json(&json!({"start": "Entrance", "end": "Plaza"}))
        .await;
    assert_eq!(stale.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_event_leaves_venue_untouched() {
    let state = test_state();
    let server = server_with(state.clone());

    let response = server
        .post("/api/events/create")
        .json(&json!({
            "name": "Broken",
            "zones": [
                {"name": "Hall", "lat": 1.0, "lng": 2.0},
                {"name": "Hall", "lat": 1.1, "lng": 2.1}
            ]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(state.events().len(), 1);
    assert!(state.venues().snapshot().contains_zone("Entrance"));
}

#[tokio::test]
async fn events_can_be_listed_and_selected() {
    let state = test_state();
    let server = server_with(state.clone());

    server
        .post("/api/events/create")
        .json(&json!({"name": "Expo", "zones": custom_zones()}))
        .await;

    let listed: Vec<Value> = server.get("/api/events").await.json();
    let ids: Vec<&str> = listed.iter().filter_map(|e| e["id"].as_str()).collect();
    assert_eq!(ids, vec!["evt_default", "evt_expo"]);
    assert_eq!(listed[1]["zone_count"], 3);
    assert_eq!(listed[1]["edge_count"], 6);
    assert_eq!(listed[1]["zones"][0], json!({"name": "Gate A", "lat": 51.5007, "lng": -0.1246}));
    assert_eq!(listed[0]["zones"].as_array().map(Vec::len), Some(9));

    let response = server
        .post("/api/events/select")
        .json(&json!({"event_id": "evt_default"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["active"], true);
    assert_eq!(body["message"], "Event 'Summer Music Festival 2025' selected");
    assert!(state.venues().snapshot().contains_zone("Entrance"));
}

#[tokio::test]
async fn selecting_unknown_event_is_not_found() {
    let server = server();

    let response = server
        .post("/api/events/select")
        .json(&json!({"event_id": "evt_missing"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(content_type(&response), "application/problem+json");
}

#[tokio::test]
async fn analysis_feeds_density_and_anomalies() {
    let server = server();

    let response = server
        .post("/api/zones/zone1/analysis")
        .json(&json!({
            "crowd_count": 240,
            "density_level": "High",
            "anomalies": [
                {"type": "fight", "description": "Scuffle near bar", "timestamp": "00:42", "confidence": 91},
                "Blocked exit"
            ],
            "description": "Dense crowd at the bar",
            "sentiment": "tense"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let density: Value = server.get("/api/zones/zone1/density").await.json();
    assert_eq!(density["density"], 0.8);
    assert_eq!(density["people_count"], 240);
    assert_eq!(density["density_level"], "High");
    assert_eq!(density["anomalies"][0], "fight: Scuffle near bar at 00:42");

    let anomalies: Vec<Value> = server.get("/api/anomalies/active").await.json();
    assert_eq!(anomalies.len(), 2);
    assert_eq!(anomalies[0]["id"], "zone1_00:42_0");
    assert_eq!(anomalies[0]["confidence"], 91);
    assert_eq!(anomalies[1]["type"], "other");
    assert_eq!(anomalies[1]["status"], "active");
}

#[tokio::test]
async fn density_without_analysis_reports_no_data() {
    let server = server();

    let response = server.get("/api/zones/zone9/density").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "zone_id": "zone9",
            "status": "no_data",
            "message": "No analysis available. Please upload video."
        })
    );
}

#[tokio::test]
async fn readiness_reports_counts() {
    let server = server();

    let response = server.get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["zones_loaded"], 9);
    assert_eq!(body["events_registered"], 1);

    let live = server.get("/health/live").await;
    assert_eq!(live.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn registered_events_survive_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ServiceConfig {
        events_path: Some(dir.path().join("events.json")),
        ..ServiceConfig::default()
    };

    let server = server_with(AppState::from_config(&config).expect("state"));
    let response = server
        .post("/api/events/create")
        .json(&json!({"name": "Expo", "zones": custom_zones()}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let restarted = server_with(AppState::from_config(&config).expect("reloaded state"));
    let listed: Vec<Value> = restarted.get("/api/events").await.json();
    let ids: Vec<&str> = listed.iter().filter_map(|e| e["id"].as_str()).collect();
    assert_eq!(ids, vec!["evt_default", "evt_expo"]);

    let selected = restarted
        .post("/api/events/select")
        .json(&json!({"event_id": "evt_expo"}))
        .await;
    assert_eq!(selected.status_code(), StatusCode::OK);

    let route = restarted
        .post("/api/path/calculate")
        .json(&json!({"start": "Gate A", "end": "Gate B"}))
        .await;
    assert_eq!(route.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn loosely_typed_analysis_is_accepted() {
    let server = server();

    let response = server
        .post("/api/zones/zone2/analysis")
        .json(&json!({
            "crowd_count": 12,
            "density_level": "Very High",
            "anomalies": [{"type": "fall", "description": "Person down", "confidence": 85.5}]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let density: Value = server.get("/api/zones/zone2/density").await.json();
    assert_eq!(density["density"], 0.1);
    assert_eq!(density["density_level"], "Unknown");
    assert_eq!(density["detailed_anomalies"][0]["confidence"], 86);
}

#[tokio::test]
async fn messages_are_stamped_and_listed() {
    let state = test_state();
    let server = server_with(state.clone());

    let response = server
        .post("/api/messages")
        .json(&json!({
            "sender": "Responder",
            "text": "Need stretcher at Food Court",
            "incidentId": "zone1_00:42_0"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "sent");
    assert_eq!(body["message"]["sender"], "Responder");
    assert_eq!(body["message"]["id"].as_str().map(str::len), Some(36));
    assert!(body["message"]["timestamp"].is_string());

    server
        .post("/api/messages")
        .json(&json!({"sender": "Admin", "text": "Dispatching"}))
        .await;

    let listed: Vec<Value> = server.get("/api/messages").await.json();
    let texts: Vec<&str> = listed.iter().filter_map(|m| m["text"].as_str()).collect();
    assert_eq!(texts, vec!["Need stretcher at Food Court", "Dispatching"]);
    assert_eq!(listed[0]["incidentId"], "zone1_00:42_0");
    assert_eq!(state.messages().len(), 2);
}

#[tokio::test]
async fn message_without_text_is_rejected() {
    let state = test_state();
    let server = server_with(state.clone());

    let response = server
        .post("/api/messages")
        .json(&json!({"sender": "Responder"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(content_type(&response), "application/problem+json");
    assert!(state.messages().is_empty());
}
