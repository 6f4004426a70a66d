use crate::auth::require_api_key;
use crate::extract::ApiJson;
use crate::infra::{BrokerageState, OpsState};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use freight_desk::brokerage::calls::{CallClassification, CallDetails, MetricsSnapshot};
use freight_desk::brokerage::carriers::CarrierVerificationResult;
use freight_desk::brokerage::loads::{Load, LoadSearch};
use freight_desk::error::ServiceError;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Success envelope shared by every `/api` endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T> {
    pub(crate) success: bool,
    pub(crate) data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) count: Option<usize>,
}

impl<T> ApiResponse<T> {
    fn item(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            count: None,
        })
    }

    fn list(data: T, count: usize) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            count: Some(count),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VerifyCarrierRequest {
    #[serde(default)]
    pub(crate) mc_number: Option<String>,
}

/// Authenticated brokerage API plus the 404 fallback.
pub fn app_router(state: BrokerageState) -> Router {
    Router::new()
        .route("/api/loads", get(list_loads))
        .route("/api/loads/search", post(search_loads).get(load_named_search))
        .route("/api/loads/:id", get(get_load))
        .route("/api/carriers/verify", post(verify_carrier))
        .route("/api/calls/classify", post(classify_call))
        .route("/api/calls/metrics", get(call_metrics))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .route("/health", get(healthcheck))
        .fallback(endpoint_not_found)
        .with_state(state)
}

pub(crate) fn with_ops_routes(router: Router) -> Router {
    router
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn endpoint_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "Endpoint not found" })),
    )
}

pub(crate) async fn list_loads(
    State(state): State<BrokerageState>,
) -> Json<ApiResponse<Vec<Load>>> {
    let loads = state.catalog.get_all().to_vec();
    let count = loads.len();
    ApiResponse::list(loads, count)
}

pub(crate) async fn get_load(
    State(state): State<BrokerageState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Load>>, ServiceError> {
    let load = state.catalog.get_by_id(&id)?;
    Ok(ApiResponse::item(load.clone()))
}

/// `GET /api/loads/search` is a lookup of the id "search", as for any
/// other `/api/loads/:id` path.
pub(crate) async fn load_named_search(
    State(state): State<BrokerageState>,
) -> Result<Json<ApiResponse<Load>>, ServiceError> {
    let load = state.catalog.get_by_id("search")?;
    Ok(ApiResponse::item(load.clone()))
}

pub(crate) async fn search_loads(
    State(state): State<BrokerageState>,
    ApiJson(criteria): ApiJson<LoadSearch>,
) -> Json<ApiResponse<Vec<Load>>> {
    let results = state.catalog.search(&criteria);
    let loads: Vec<Load> = results.loads.into_iter().cloned().collect();
    ApiResponse::list(loads, results.count)
}

pub(crate) async fn verify_carrier(
    State(state): State<BrokerageState>,
    ApiJson(payload): ApiJson<VerifyCarrierRequest>,
) -> Result<Json<ApiResponse<CarrierVerificationResult>>, ServiceError> {
    let result = state
        .carriers
        .verify(payload.mc_number.as_deref())
        .await?;
    Ok(ApiResponse::item(result))
}

pub(crate) async fn classify_call(
    State(state): State<BrokerageState>,
    ApiJson(call): ApiJson<CallDetails>,
) -> Json<ApiResponse<CallClassification>> {
    ApiResponse::item(state.classifier.classify(&call))
}

pub(crate) async fn call_metrics(
    State(state): State<BrokerageState>,
) -> Json<ApiResponse<MetricsSnapshot>> {
    ApiResponse::item(state.metrics_source.snapshot())
}
