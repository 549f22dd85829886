pub mod catalog;
pub mod constants;
mod conversion;
pub mod eclipse_search;
pub mod horizon;
pub mod observer;
pub mod predictor_errors;
pub mod search_params;
pub mod time;

pub use catalog::{load_catalog, CatalogEntry, CatalogKind};
pub use conversion::{deg_to_rad, rad_to_deg};
pub use eclipse_search::{search_eclipses, EclipseWindow, SearchResult};
pub use horizon::EventPoint;
pub use observer::ObserverLocation;
pub use predictor_errors::PredictorError;
pub use search_params::{RawSearchParams, SearchMode, SearchParams};
