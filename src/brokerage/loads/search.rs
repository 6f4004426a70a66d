use serde::{Deserialize, Serialize};

use super::domain::Load;

/// Conjunctive filter over the catalog. Absent or blank criteria impose no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSearch {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub min_rate: Option<f64>,
    #[serde(default)]
    pub max_rate: Option<f64>,
}

impl LoadSearch {
    pub fn matches(&self, load: &Load) -> bool {
        let origin_ok = criterion(&self.origin)
            .map_or(true, |needle| contains_ignore_case(&load.origin, needle));
        let destination_ok = criterion(&self.destination)
            .map_or(true, |needle| contains_ignore_case(&load.destination, needle));
        let equipment_ok = criterion(&self.equipment_type)
            .map_or(true, |wanted| load.equipment_type.to_lowercase() == wanted.to_lowercase());
        let min_ok = self.min_rate.map_or(true, |min| load.loadboard_rate >= min);
        let max_ok = self.max_rate.map_or(true, |max| load.loadboard_rate <= max);

        origin_ok && destination_ok && equipment_ok && min_ok && max_ok
    }
}

fn criterion(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Matching loads in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<'a> {
    pub loads: Vec<&'a Load>,
    pub count: usize,
}

impl<'a> FromIterator<&'a Load> for SearchResults<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Load>>(iter: I) -> Self {
        let loads: Vec<&'a Load> = iter.into_iter().collect();
        let count = loads.len();
        Self { loads, count }
    }
}
