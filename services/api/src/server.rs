use crate::cli::ServeArgs;
use crate::infra::{BrokerageState, OpsState};
use crate::routes::{app_router, with_ops_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use freight_desk::config::AppConfig;
use freight_desk::error::AppError;
use freight_desk::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(loads) = args.loads.take() {
        config.dataset.loads_path = loads;
    }

    telemetry::init(&config.telemetry)?;

    if config.auth.api_key.is_none() {
        warn!("API_KEY is not set; every /api request will be rejected");
    }

    let brokerage = BrokerageState::from_config(&config)?;
    info!(
        loads = brokerage.catalog.len(),
        registry = brokerage.carriers.registry_name(),
        "brokerage state initialised"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let ops_state = OpsState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_ops_routes(app_router(brokerage))
        .layer(Extension(ops_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(environment = ?config.environment, %addr, "freight desk api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
