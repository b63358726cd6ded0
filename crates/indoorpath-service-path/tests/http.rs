use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use indoorpath_service_path::app;
use indoorpath_service_shared::test_utils::{fixture_landmarks, test_state};
use indoorpath_service_shared::MetricsConfig;

fn server() -> TestServer {
    let metrics = MetricsConfig {
        enabled: false,
        ..MetricsConfig::default()
    };
    TestServer::new(app(test_state(), &metrics)).expect("test server")
}

fn step_names(body: &Value) -> Vec<String> {
    body["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn printer_by_category_takes_the_elevator() {
    let response = server()
        .get("/path")
        .add_query_param("from", fixture_landmarks::ENTRANCE)
        .add_query_param("to", "printer")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["algorithm"], "bfs (via type)");
    assert_eq!(body["from"], fixture_landmarks::ENTRANCE);
    assert_eq!(body["to"], fixture_landmarks::PRINTER);
    assert_eq!(
        step_names(&body),
        vec![
            "Boelter Entrance Door",
            "3-Hall-A",
            "3-Elevator",
            "4-Elevator",
            "4-Hall-A",
            "4-Printer-Nook",
        ]
    );
    assert_eq!(body["steps"][5]["depth"], 5);
    assert_eq!(body["hops"], 5);
}

#[tokio::test]
async fn unrestricted_route_uses_compressed_stairs() {
    let response = server()
        .get("/path")
        .add_query_param("from", fixture_landmarks::ENTRANCE)
        .add_query_param("to", fixture_landmarks::PRINTER)
        .add_query_param("accessible", "false")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["algorithm"], "bfs");
    assert_eq!(
        step_names(&body),
        vec![
            "Boelter Entrance Door",
            "3-Hall-A",
            "3-Stair-UpTo4",
            "4-Hall-A",
            "4-Printer-Nook",
        ]
    );
}

#[tokio::test]
async fn api_alias_and_graph_mode() {
    let response = server()
        .get("/api/path")
        .add_query_param("from", fixture_landmarks::ENTRANCE)
        .add_query_param("to", fixture_landmarks::ROOM_3420)
        .add_query_param("mode", "graph")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["algorithm"], "bfs");
    assert_eq!(step_names(&body).len(), 4);
}

#[tokio::test]
async fn missing_endpoints_are_rejected() {
    let response = server()
        .get("/path")
        .add_query_param("from", fixture_landmarks::ENTRANCE)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "`from` and `to` are required");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn unknown_mode_is_rejected() {
    let response = server()
        .get("/path")
        .add_query_param("from", fixture_landmarks::ENTRANCE)
        .add_query_param("to", "printer")
        .add_query_param("mode", "dijkstra")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_accessible_flag_is_rejected() {
    let response = server()
        .get("/path?from=Room%203420&to=printer&accessible=maybe")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn unknown_landmark_is_not_found() {
    let response = server()
        .get("/path")
        .add_query_param("from", "Boelter Entrence")
        .add_query_param("to", "printer")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    let error = body["error"].as_str().unwrap_or_default();
    assert!(error.contains("Boelter Entrance"), "expected suggestion in {error}");
}

#[tokio::test]
async fn closed_destination_is_not_found() {
    let response = server()
        .get("/path")
        .add_query_param("from", fixture_landmarks::ENTRANCE)
        .add_query_param("to", fixture_landmarks::CLOSED_LAB)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_with_no_candidates_is_not_found() {
    let response = server()
        .get("/path")
        .add_query_param("from", fixture_landmarks::ENTRANCE)
        .add_query_param("to", "male-restroom")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "no reachable landmark of type 'male-restroom'");
}

#[tokio::test]
async fn unlinked_source_is_bad_request() {
    let response = server()
        .get("/path")
        .add_query_param("from", fixture_landmarks::UNLINKED_KIOSK)
        .add_query_param("to", "printer")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn problem_responses_use_problem_json() {
    let response = server()
        .get("/path")
        .add_query_param("from", "Nowhere")
        .add_query_param("to", "printer")
        .await;

    let content_type = response.header("content-type");
    assert_eq!(content_type, "application/problem+json");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let response = server()
        .get("/health/live")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-abc"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), "req-abc");
}

#[tokio::test]
async fn readiness_reports_loaded_counts() {
    let response = server().get("/health/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["nodes_loaded"], 12);
    assert_eq!(body["landmarks_loaded"], 6);
}
