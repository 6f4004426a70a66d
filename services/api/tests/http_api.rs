//! HTTP scenarios against the router built from the shipped sample dataset.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use freight_desk::brokerage::calls::{CallClassifier, FixedDuration, StaticMetricsSource};
use freight_desk::brokerage::carriers::{CarrierVerifier, StaticCarrierRegistry};
use freight_desk::brokerage::loads::LoadCatalog;
use freight_desk_api::{app_router, BrokerageState};
use serde_json::{json, Value};
use tower::ServiceExt;

const API_KEY: &str = "demo-key";

fn sample_dataset() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/loads.json")
}

fn router() -> Router {
    let catalog = LoadCatalog::from_path(sample_dataset()).expect("sample dataset loads");
    app_router(BrokerageState::new(
        catalog,
        CarrierVerifier::new(Arc::new(StaticCarrierRegistry::default())),
        CallClassifier::new(Arc::new(FixedDuration(300))),
        Arc::new(StaticMetricsSource),
        Some(API_KEY.to_string()),
    ))
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router()
        .oneshot(
            Request::post(uri)
                .header("x-api-key", API_KEY)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let status = response.status();
    (status, read_json_body(response).await)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = router()
        .oneshot(
            Request::get(uri)
                .header("x-api-key", API_KEY)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let status = response.status();
    (status, read_json_body(response).await)
}

#[tokio::test]
async fn sample_dataset_round_trips_through_lookup() {
    let (status, listing) = get("/api/loads").await;
    assert_eq!(status, StatusCode::OK);
    let loads = listing["data"].as_array().expect("array of loads");
    assert_eq!(listing["count"], loads.len());

    for load in loads {
        let id = load["load_id"].as_str().expect("load id");
        let (status, single) = get(&format!("/api/loads/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&single["data"], load);
    }
}

#[tokio::test]
async fn broker_search_for_los_angeles_dry_vans() {
    let (status, body) = post(
        "/api/loads/search",
        json!({ "origin": "los angeles", "equipment_type": "DRY VAN", "min_rate": 1500 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["load_id"], "L001");
    assert_eq!(body["data"][0]["commodity_type"], "Electronics");
}

#[tokio::test]
async fn carrier_then_call_flow() {
    let (status, verified) = post("/api/carriers/verify", json!({ "mc_number": "123456" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["data"]["status"], "ACTIVE");

    let (status, classified) = post(
        "/api/calls/classify",
        json!({
            "call_transcript": "Carrier was very interested and accepted",
            "negotiation_rounds": 2
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(classified["data"]["outcome"], "UNKNOWN");
    assert_eq!(classified["data"]["sentiment"], "POSITIVE");
    assert_eq!(classified["data"]["extracted_data"]["call_duration"], 300);
    assert!(classified["data"]["extracted_data"]
        .get("final_price")
        .is_none());
}

#[tokio::test]
async fn failed_negotiation_is_reported() {
    let (_, classified) = post(
        "/api/calls/classify",
        json!({ "call_transcript": "sounds good", "negotiation_rounds": 3 }),
    )
    .await;
    assert_eq!(classified["data"]["outcome"], "NEGOTIATION_FAILED");
    assert_eq!(classified["data"]["sentiment"], "NEGATIVE");
}
