use serde::{Deserialize, Serialize};

/// Aggregate call statistics shown on the operations dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_calls: u32,
    pub successful_calls: u32,
    pub failed_calls: u32,
    pub average_negotiation_rounds: f64,
    pub average_call_duration: u32,
    pub success_rate: f64,
    pub sentiment_distribution: SentimentDistribution,
    pub outcome_distribution: OutcomeDistribution,
    pub top_equipment_types: Vec<EquipmentCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub success: u32,
    pub negotiation_failed: u32,
    pub no_interest: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCount {
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub count: u32,
}

/// Provider of the dashboard snapshot.
pub trait MetricsSource: Send + Sync {
    fn snapshot(&self) -> MetricsSnapshot;
}

/// Serves the same hardcoded snapshot on every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMetricsSource;

impl MetricsSource for StaticMetricsSource {
    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_calls: 150,
            successful_calls: 89,
            failed_calls: 61,
            average_negotiation_rounds: 2.3,
            average_call_duration: 245,
            success_rate: 59.3,
            sentiment_distribution: SentimentDistribution {
                positive: 45,
                neutral: 35,
                negative: 20,
            },
            outcome_distribution: OutcomeDistribution {
                success: 89,
                negotiation_failed: 35,
                no_interest: 26,
            },
            top_equipment_types: vec![
                equipment("Dry Van", 45),
                equipment("Reefer", 32),
                equipment("Flatbed", 28),
            ],
        }
    }
}

fn equipment(equipment_type: &str, count: u32) -> EquipmentCount {
    EquipmentCount {
        equipment_type: equipment_type.to_string(),
        count,
    }
}
