use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use super::domain::CarrierRecord;
use super::registry::{motor_carrier_record, CarrierRegistry, RegistryError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// FMCSA QCMobile lookup by MC docket number.
#[derive(Debug, Clone)]
pub struct FmcsaCarrierRegistry {
    client: reqwest::Client,
    base_url: String,
    web_key: String,
}

impl FmcsaCarrierRegistry {
    pub fn new(
        base_url: impl Into<String>,
        web_key: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            web_key: web_key.into(),
        })
    }

    fn docket_url(&self, mc_number: &str) -> String {
        format!("{}/carriers/docket-number/{}", self.base_url, mc_number)
    }
}

#[async_trait]
impl CarrierRegistry for FmcsaCarrierRegistry {
    async fn lookup(&self, mc_number: &str) -> Result<Option<CarrierRecord>, RegistryError> {
        // Docket numbers are numeric; anything else cannot be registered.
        if !mc_number.chars().all(|c| c.is_ascii_digit()) {
            return Ok(None);
        }

        let response = self
            .client
            .get(self.docket_url(mc_number))
            .query(&[("webKey", self.web_key.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.text().await?;
                parse_docket_response(&body)
            }
            status => Err(RegistryError::UnexpectedStatus(status.as_u16())),
        }
    }

    fn name(&self) -> &'static str {
        "fmcsa"
    }
}

#[derive(Debug, Deserialize)]
struct DocketResponse {
    #[serde(default)]
    content: Option<Vec<DocketEntry>>,
}

#[derive(Debug, Deserialize)]
struct DocketEntry {
    carrier: FmcsaCarrier,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmcsaCarrier {
    #[serde(default)]
    legal_name: Option<String>,
    #[serde(default)]
    dba_name: Option<String>,
    #[serde(default)]
    allowed_to_operate: Option<String>,
}

/// A carrier counts as valid only when FMCSA reports it may operate.
pub(crate) fn parse_docket_response(body: &str) -> Result<Option<CarrierRecord>, RegistryError> {
    let response: DocketResponse = serde_json::from_str(body)?;

    let carrier = response
        .content
        .unwrap_or_default()
        .into_iter()
        .map(|entry| entry.carrier)
        .find(|carrier| {
            carrier
                .allowed_to_operate
                .as_deref()
                .is_some_and(|flag| flag.eq_ignore_ascii_case("Y"))
        });

    Ok(carrier.map(|carrier| {
        let name = carrier
            .legal_name
            .or(carrier.dba_name)
            .unwrap_or_else(|| "Unknown carrier".to_string());
        motor_carrier_record(name)
    }))
}
