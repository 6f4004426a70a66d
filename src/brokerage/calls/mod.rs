//! Call outcome classification and the call metrics snapshot.

mod classifier;
mod domain;
mod duration;
mod metrics;

pub use classifier::{
    CallClassifier, CLASSIFICATION_CONFIDENCE, KEY_TOPICS, NEGATIVE_TERMS, POSITIVE_TERMS,
};
pub use domain::{CallClassification, CallDetails, CallOutcome, ExtractedCallData, Sentiment};
pub use duration::{DurationSource, FixedDuration, RandomDuration, CALL_DURATION_SECS};
pub use metrics::{
    EquipmentCount, MetricsSnapshot, MetricsSource, OutcomeDistribution, SentimentDistribution,
    StaticMetricsSource,
};
