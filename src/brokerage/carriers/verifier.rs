use std::sync::Arc;

use tracing::debug;

use super::domain::CarrierVerificationResult;
use super::registry::CarrierRegistry;
use crate::error::ServiceError;

/// Answers whether an MC number belongs to an authorized carrier.
#[derive(Clone)]
pub struct CarrierVerifier {
    registry: Arc<dyn CarrierRegistry>,
}

impl CarrierVerifier {
    pub fn new(registry: Arc<dyn CarrierRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry_name(&self) -> &'static str {
        self.registry.name()
    }

    pub async fn verify(
        &self,
        mc_number: Option<&str>,
    ) -> Result<CarrierVerificationResult, ServiceError> {
        let mc_number = mc_number
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ServiceError::InvalidInput("MC number is required".to_string()))?;

        let record = self
            .registry
            .lookup(mc_number)
            .await
            .map_err(|err| ServiceError::internal("Failed to verify carrier", err))?;

        debug!(
            registry = self.registry.name(),
            %mc_number,
            is_valid = record.is_some(),
            "carrier verified"
        );

        Ok(CarrierVerificationResult::from_lookup(mc_number, record))
    }
}

impl std::fmt::Debug for CarrierVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarrierVerifier")
            .field("registry", &self.registry.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brokerage::carriers::{
        CarrierRecord, CarrierStatus, RegistryError, StaticCarrierRegistry,
    };
    use async_trait::async_trait;

    struct UnavailableRegistry;

    #[async_trait]
    impl CarrierRegistry for UnavailableRegistry {
        async fn lookup(&self, _mc_number: &str) -> Result<Option<CarrierRecord>, RegistryError> {
            Err(RegistryError::UnexpectedStatus(503))
        }

        fn name(&self) -> &'static str {
            "unavailable"
        }
    }

    fn verifier() -> CarrierVerifier {
        CarrierVerifier::new(Arc::new(StaticCarrierRegistry::default()))
    }

    #[tokio::test]
    async fn missing_or_blank_mc_number_is_invalid_input() {
        for input in [None, Some(""), Some("   ")] {
            let err = verifier().verify(input).await.expect_err("rejected");
            assert!(matches!(err, ServiceError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn allow_listed_carrier_is_active() {
        let result = verifier().verify(Some("123456")).await.expect("verifies");
        assert!(result.is_valid);
        assert_eq!(result.status, CarrierStatus::Active);
        assert_eq!(result.carrier_name.as_deref(), Some("Carrier 123456"));
        assert_eq!(result.authority_type.as_deref(), Some("Motor Carrier"));
    }

    #[tokio::test]
    async fn unknown_carrier_is_invalid() {
        let result = verifier().verify(Some("999999")).await.expect("verifies");
        assert_eq!(result.mc_number, "999999");
        assert!(!result.is_valid);
        assert_eq!(result.status, CarrierStatus::Invalid);
        assert!(result.carrier_name.is_none());
        assert!(result.authority_type.is_none());
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_ignored() {
        let result = verifier().verify(Some(" 901234 ")).await.expect("verifies");
        assert!(result.is_valid);
        assert_eq!(result.mc_number, "901234");
    }

    #[tokio::test]
    async fn registry_failure_is_internal() {
        let verifier = CarrierVerifier::new(Arc::new(UnavailableRegistry));
        let err = verifier.verify(Some("123456")).await.expect_err("fails");
        assert!(matches!(
            err,
            ServiceError::Internal {
                context: "Failed to verify carrier",
                ..
            }
        ));
    }
}
