use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use super::domain::Load;
use super::search::{LoadSearch, SearchResults};
use super::source::{read_loads, DatasetError};
use crate::error::ServiceError;

/// Immutable set of loads read once at startup and shared with handlers.
#[derive(Debug, Clone, Default)]
pub struct LoadCatalog {
    loads: Vec<Load>,
}

impl LoadCatalog {
    /// Builds a catalog, keeping the first record for any repeated `load_id`.
    pub fn new(loads: Vec<Load>) -> Self {
        let mut seen = HashSet::with_capacity(loads.len());
        let mut unique = Vec::with_capacity(loads.len());
        for load in loads {
            if seen.insert(load.load_id.clone()) {
                unique.push(load);
            } else {
                warn!(load_id = %load.load_id, "duplicate load identifier ignored");
            }
        }

        Self { loads: unique }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        read_loads(path).map(Self::new)
    }

    /// Loads the dataset, degrading to an empty catalog when it is missing or
    /// malformed.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(catalog) => {
                info!(count = catalog.len(), path = %path.display(), "loaded load dataset");
                catalog
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "serving an empty load catalog");
                Self::default()
            }
        }
    }

    pub fn get_all(&self) -> &[Load] {
        &self.loads
    }

    pub fn get_by_id(&self, id: &str) -> Result<&Load, ServiceError> {
        self.loads
            .iter()
            .find(|load| load.load_id == id)
            .ok_or_else(|| ServiceError::NotFound {
                resource: "Load",
                id: id.to_string(),
            })
    }

    pub fn search(&self, criteria: &LoadSearch) -> SearchResults<'_> {
        self.loads
            .iter()
            .filter(|load| criteria.matches(load))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }
}
