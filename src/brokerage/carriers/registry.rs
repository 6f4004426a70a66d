use async_trait::async_trait;
use std::collections::HashSet;

use super::domain::CarrierRecord;

pub const DEFAULT_ALLOW_LIST: [&str; 4] = ["123456", "789012", "345678", "901234"];

const MOTOR_CARRIER_AUTHORITY: &str = "Motor Carrier";

/// Source of truth for motor-carrier operating authority.
///
/// `Ok(None)` means the registry answered and the carrier is not authorized.
#[async_trait]
pub trait CarrierRegistry: Send + Sync {
    async fn lookup(&self, mc_number: &str) -> Result<Option<CarrierRecord>, RegistryError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("registry responded with status {0}")]
    UnexpectedStatus(u16),
    #[error("registry payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fixed allow-list standing in for the federal registry.
#[derive(Debug, Clone)]
pub struct StaticCarrierRegistry {
    allowed: HashSet<String>,
}

impl StaticCarrierRegistry {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for StaticCarrierRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOW_LIST)
    }
}

#[async_trait]
impl CarrierRegistry for StaticCarrierRegistry {
    async fn lookup(&self, mc_number: &str) -> Result<Option<CarrierRecord>, RegistryError> {
        if !self.allowed.contains(mc_number) {
            return Ok(None);
        }

        Ok(Some(motor_carrier_record(format!("Carrier {mc_number}"))))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

pub(crate) fn motor_carrier_record(carrier_name: String) -> CarrierRecord {
    CarrierRecord {
        carrier_name,
        authority_type: MOTOR_CARRIER_AUTHORITY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allow_listed_numbers_resolve() {
        let registry = StaticCarrierRegistry::default();
        let record = registry
            .lookup("789012")
            .await
            .expect("lookup succeeds")
            .expect("allow-listed");
        assert_eq!(record.carrier_name, "Carrier 789012");
        assert_eq!(record.authority_type, "Motor Carrier");
    }

    #[tokio::test]
    async fn unknown_numbers_are_absent() {
        let registry = StaticCarrierRegistry::new(["555555"]);
        assert!(registry.lookup("123456").await.expect("lookup").is_none());
        assert!(registry.lookup("555555").await.expect("lookup").is_some());
    }
}
