mod cache;
mod fallback;
mod fetch;
mod loader;
mod schema;

pub use cache::{Clock, SystemClock, TableCache};
pub use fallback::fallback_tables;
pub use fetch::{DatasetGateway, FetchError, HuggingFaceGateway};
pub use loader::{DatasetLoader, LoadedTables, SourceProvenance};
pub use schema::{ExpertRating, RawTables, TaskMetadata, WorkerResponse};

use std::fmt;

/// Why a remote load could not produce usable tables. Never escapes the
/// loader; it becomes the fallback reason instead.
#[derive(Debug)]
pub enum DatasetError {
    Fetch(FetchError),
    Csv(csv::Error),
    Schema {
        resource: &'static str,
        missing: Vec<String>,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Fetch(err) => write!(f, "failed to fetch dataset resource: {}", err),
            DatasetError::Csv(err) => write!(f, "invalid dataset CSV data: {}", err),
            DatasetError::Schema { resource, missing } => write!(
                f,
                "resource {} is missing expected columns: {}",
                resource,
                missing.join(", ")
            ),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Fetch(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
            DatasetError::Schema { .. } => None,
        }
    }
}

impl From<FetchError> for DatasetError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
