use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarrierStatus {
    Active,
    Invalid,
}

/// Registry entry for a carrier with operating authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierRecord {
    pub carrier_name: String,
    pub authority_type: String,
}

/// Answer returned to callers of the verify endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierVerificationResult {
    pub mc_number: String,
    pub is_valid: bool,
    pub carrier_name: Option<String>,
    pub status: CarrierStatus,
    pub authority_type: Option<String>,
}

impl CarrierVerificationResult {
    pub fn from_lookup(mc_number: impl Into<String>, record: Option<CarrierRecord>) -> Self {
        let mc_number = mc_number.into();
        match record {
            Some(record) => Self {
                mc_number,
                is_valid: true,
                carrier_name: Some(record.carrier_name),
                status: CarrierStatus::Active,
                authority_type: Some(record.authority_type),
            },
            None => Self {
                mc_number,
                is_valid: false,
                carrier_name: None,
                status: CarrierStatus::Invalid,
                authority_type: None,
            },
        }
    }
}
