use std::sync::Arc;

use super::domain::{CallClassification, CallDetails, CallOutcome, ExtractedCallData, Sentiment};
use super::duration::{DurationSource, RandomDuration};

pub const POSITIVE_TERMS: [&str; 5] = ["interested", "accept", "good", "deal", "yes"];
pub const NEGATIVE_TERMS: [&str; 4] = ["no", "reject", "too expensive", "not interested"];
pub const KEY_TOPICS: [&str; 3] = ["pricing", "delivery_time", "equipment_type"];

/// Reported for every classification; the rules do not score themselves.
pub const CLASSIFICATION_CONFIDENCE: f64 = 0.85;

const FAILED_NEGOTIATION_ROUNDS: i64 = 3;

/// Rule-based classifier for negotiated carrier calls.
#[derive(Clone)]
pub struct CallClassifier {
    durations: Arc<dyn DurationSource>,
}

impl Default for CallClassifier {
    fn default() -> Self {
        Self::new(Arc::new(RandomDuration))
    }
}

impl CallClassifier {
    pub fn new(durations: Arc<dyn DurationSource>) -> Self {
        Self { durations }
    }

    pub fn classify(&self, call: &CallDetails) -> CallClassification {
        let (outcome, sentiment) = assess(call);

        CallClassification {
            outcome,
            sentiment,
            confidence: CLASSIFICATION_CONFIDENCE,
            extracted_data: ExtractedCallData {
                final_price: call.final_price,
                negotiation_rounds: call.negotiation_rounds,
                call_duration: self.durations.call_duration_secs(),
                key_topics: KEY_TOPICS.iter().map(|topic| topic.to_string()).collect(),
            },
        }
    }
}

impl std::fmt::Debug for CallClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallClassifier").finish_non_exhaustive()
    }
}

/// First matching rule wins. The transcript rule only moves sentiment;
/// outcome stays unknown there.
fn assess(call: &CallDetails) -> (CallOutcome, Sentiment) {
    if call.final_price.is_some_and(|price| price > 0.0) {
        return (CallOutcome::Success, Sentiment::Positive);
    }

    if call
        .negotiation_rounds
        .is_some_and(|rounds| rounds >= FAILED_NEGOTIATION_ROUNDS)
    {
        return (CallOutcome::NegotiationFailed, Sentiment::Negative);
    }

    match call.call_transcript.as_deref() {
        Some(transcript) if !transcript.is_empty() => {
            (CallOutcome::Unknown, transcript_sentiment(transcript))
        }
        _ => (CallOutcome::Unknown, Sentiment::Neutral),
    }
}

/// Each lexicon term counts once when it appears anywhere in the transcript.
fn transcript_sentiment(transcript: &str) -> Sentiment {
    let transcript = transcript.to_lowercase();
    let hits = |terms: &[&str]| {
        terms
            .iter()
            .filter(|term| transcript.contains(**term))
            .count()
    };

    let positive = hits(&POSITIVE_TERMS);
    let negative = hits(&NEGATIVE_TERMS);

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}
