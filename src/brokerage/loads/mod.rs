mod catalog;
mod domain;
mod search;
mod source;

pub use catalog::LoadCatalog;
pub use domain::Load;
pub use search::{LoadSearch, SearchResults};
pub use source::{read_loads, DatasetError, DatasetFormat};
