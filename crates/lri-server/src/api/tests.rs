use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, state::AppState};

fn test_config() -> Config {
    Config {
        boundary_path: std::env::temp_dir()
            .join(format!("lri-missing-{}.geojson", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .to_string(),
        ..Config::default()
    }
}

fn setup_app() -> axum::Router {
    let config = test_config();
    let state = Arc::new(AppState::new(config.clone()));
    api::routes(&config).with_state(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn score_returns_full_report() {
    let app = setup_app();

    let res = app
        .oneshot(post_json(
            "/api/calculate_lri",
            json!({ "lat": 37.4602, "lon": 126.4407, "wing_type": "rotary", "uam_type": "evtol" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = read_json(res).await;
    for key in ["LRI", "Grade", "W_score", "N_score", "T_score", "HardStop", "location", "Evidence"] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
    let lri = body["LRI"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&lri));
    assert_eq!(body["location"], "Lat: 37.4602, Lon: 126.4407");
    assert_eq!(body["wing_type"], "rotary");
    assert!(body["Evidence"]["navigation"]["HPL"].is_number());
}

#[tokio::test]
async fn score_requires_coordinates() {
    let app = setup_app();

    let res = app
        .oneshot(post_json("/api/calculate_lri", json!({ "lat": 37.0 })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(
        body["error"],
        "Latitude (lat) and Longitude (lon) are required."
    );
}

#[tokio::test]
async fn score_rejects_out_of_range_coordinates() {
    let app = setup_app();

    let res = app
        .oneshot(post_json("/api/calculate_lri", json!({ "lat": 123.0, "lon": 127.0 })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn identical_requests_score_identically() {
    let app = setup_app();
    let body = json!({ "lat": 36.1234, "lon": 128.9876 });

    let first = read_json(
        app.clone()
            .oneshot(post_json("/api/calculate_lri", body.clone()))
            .await
            .unwrap(),
    )
    .await;
    let second = read_json(
        app.oneshot(post_json("/api/calculate_lri", body))
            .await
            .unwrap(),
    )
    .await;

    for key in ["LRI", "Grade", "W_score", "N_score", "T_score", "HardStop", "Evidence"] {
        assert_eq!(first[key], second[key], "{key} differs");
    }
}

#[tokio::test]
async fn storm_cell_is_a_hard_stop() {
    let app = setup_app();

    let res = app
        .oneshot(post_json("/api/calculate_lri", json!({ "lat": 35.0, "lon": 127.0 })))
        .await
        .unwrap();
    let body = read_json(res).await;
    assert_eq!(body["HardStop"], true);
    assert_eq!(body["Grade"], "RED (HARD STOP)");
    let reasons: Vec<&str> = body["Evidence"]["hard_stop"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["reason"].as_str())
        .collect();
    assert!(reasons.contains(&"ctbt"));
}

#[tokio::test]
async fn grid_decays_from_center() {
    let app = setup_app();

    let res = app
        .oneshot(post_json(
            "/api/grid",
            json!({ "lat": 35.5, "lon": 128.0, "lri": 72.5, "grid_size": 5, "cell_size": 0.1 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = read_json(res).await;
    assert_eq!(body["type"], "FeatureCollection");
    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), 25);
    // Row-major, so index 12 is the center and 0/4/20/24 are the corners
    assert_eq!(features[12]["properties"]["lri"], 72.5);
    for corner in [0, 4, 20, 24] {
        assert_eq!(features[corner]["properties"]["lri"], 0.0);
    }
}

#[tokio::test]
async fn grid_rejects_degenerate_size() {
    let app = setup_app();

    let res = app
        .oneshot(post_json(
            "/api/grid",
            json!({ "lat": 35.5, "lon": 128.0, "lri": 72.5, "grid_size": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn grid_rejects_oversized_requests() {
    let app = setup_app();

    for body in [
        json!({ "lat": 35.5, "lon": 128.0, "lri": 72.5, "grid_size": 200001 }),
        json!({ "lat": 35.5, "lon": 128.0, "lri": 72.5, "grid_size": 103 }),
        json!({ "lat": 35.5, "lon": 128.0, "lri": 72.5, "grid_size": 9, "cell_size": 45.0 }),
    ] {
        let res = app
            .clone()
            .oneshot(post_json("/api/grid", body.clone()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{body}");
        let err = read_json(res).await;
        assert!(err["error"].is_string());
    }
}

#[tokio::test]
async fn grid_requires_lri_within_range() {
    let app = setup_app();

    for body in [
        json!({ "lat": 35.5, "lon": 128.0 }),
        json!({ "lat": 35.5, "lon": 128.0, "lri": -5.0 }),
        json!({ "lat": 35.5, "lon": 128.0, "lri": 100.5 }),
    ] {
        let res = app
            .clone()
            .oneshot(post_json("/api/grid", body.clone()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{body}");
        let err = read_json(res).await;
        assert_eq!(
            err["error"],
            "Center LRI (lri) is required and must be between 0 and 100."
        );
    }
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let app = setup_app();

    let res = app
        .clone()
        .oneshot(post_json(
            "/api/calculate_lri",
            json!({ "lat": "abc", "lon": 127.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err = read_json(res).await;
    assert!(err["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/grid")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(res).await["error"].is_string());
}

#[tokio::test]
async fn scenario_lookup() {
    let app = setup_app();

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/scenarios/warning")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["scenario"], "warning");
    assert_eq!(body["Grade"], "BLUE (WARNING)");
    assert_eq!(body["record"]["HPL"], 78.0);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/scenarios/tornado")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn map_renders_without_boundary_file() {
    let app = setup_app();

    let res = app
        .oneshot(Request::builder().uri("/api/map").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("L.map('map')"));
}

#[tokio::test]
async fn cors_allows_configured_origins_only() {
    let app = setup_app();

    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/calculate_lri")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    };

    let res = app
        .clone()
        .oneshot(preflight("http://localhost:3000"))
        .await
        .unwrap();
    assert_eq!(
        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    assert_eq!(
        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );

    let res = app
        .oneshot(preflight("http://evil.example.com"))
        .await
        .unwrap();
    assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let app = setup_app();

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");

    let res = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}
