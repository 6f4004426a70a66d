use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallOutcome {
    Success,
    NegotiationFailed,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Metadata captured at the end of a carrier call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallDetails {
    #[serde(default)]
    pub call_transcript: Option<String>,
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_rounds")]
    pub negotiation_rounds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCallData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiation_rounds: Option<i64>,
    pub call_duration: u32,
    pub key_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallClassification {
    pub outcome: CallOutcome,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub extracted_data: ExtractedCallData,
}

/// Accepts any JSON number for the round count. Fractions are floored, which
/// keeps `rounds >= n` comparisons the same as on the raw value. Numeric
/// strings are parsed; unparseable text and `null` count as absent.
fn lenient_rounds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RoundsVisitor;

    impl<'de> Visitor<'de> for RoundsVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number of negotiation rounds")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(i64::try_from(value).unwrap_or(i64::MAX)))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            if value.is_nan() {
                return Ok(None);
            }
            Ok(Some(value.floor() as i64))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            match value.trim().parse::<f64>() {
                Ok(parsed) => self.visit_f64(parsed),
                Err(_) => Ok(None),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(RoundsVisitor)
}
