use freight_desk::brokerage::calls::{CallClassifier, MetricsSource, StaticMetricsSource};
use freight_desk::brokerage::carriers::{
    CarrierRegistry, CarrierVerifier, FmcsaCarrierRegistry, RegistryError, StaticCarrierRegistry,
};
use freight_desk::brokerage::loads::LoadCatalog;
use freight_desk::config::{AppConfig, RegistryConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Operational state for the health, readiness, and Prometheus endpoints.
#[derive(Clone)]
pub(crate) struct OpsState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Everything the `/api` handlers evaluate against. Built once at startup.
#[derive(Clone)]
pub struct BrokerageState {
    pub(crate) catalog: Arc<LoadCatalog>,
    pub(crate) carriers: CarrierVerifier,
    pub(crate) classifier: CallClassifier,
    pub(crate) metrics_source: Arc<dyn MetricsSource>,
    pub(crate) api_key: Option<Arc<str>>,
}

impl BrokerageState {
    pub fn new(
        catalog: LoadCatalog,
        carriers: CarrierVerifier,
        classifier: CallClassifier,
        metrics_source: Arc<dyn MetricsSource>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            carriers,
            classifier,
            metrics_source,
            api_key: api_key.map(Arc::from),
        }
    }

    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, RegistryError> {
        let catalog = LoadCatalog::load_or_empty(&config.dataset.loads_path);
        let carriers = CarrierVerifier::new(build_registry(&config.registry)?);

        Ok(Self::new(
            catalog,
            carriers,
            CallClassifier::default(),
            Arc::new(StaticMetricsSource),
            config.auth.api_key.clone(),
        ))
    }
}

pub(crate) fn build_registry(
    config: &RegistryConfig,
) -> Result<Arc<dyn CarrierRegistry>, RegistryError> {
    Ok(match config {
        RegistryConfig::Static => Arc::new(StaticCarrierRegistry::default()),
        RegistryConfig::Fmcsa { base_url, web_key } => {
            Arc::new(FmcsaCarrierRegistry::new(base_url.clone(), web_key.clone())?)
        }
    })
}
