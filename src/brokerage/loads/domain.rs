use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A freight listing offered to carriers.
///
/// Only the five core attributes are typed; anything else present in the
/// dataset (pickup windows, weight, commodity, notes) rides along in
/// `attributes` and is serialized back out at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub load_id: String,
    pub origin: String,
    pub destination: String,
    pub equipment_type: String,
    pub loadboard_rate: f64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Load {
    pub fn new(
        load_id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        equipment_type: impl Into<String>,
        loadboard_rate: f64,
    ) -> Self {
        Self {
            load_id: load_id.into(),
            origin: origin.into(),
            destination: destination.into(),
            equipment_type: equipment_type.into(),
            loadboard_rate,
            attributes: Map::new(),
        }
    }
}
