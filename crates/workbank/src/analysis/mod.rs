mod aggregate;
mod combine;
mod export;
mod query;
mod stats;

pub use combine::{prepare_analysis, TaskAnalysisRow};
pub use export::{read_csv, write_csv};
pub use query::{
    apply_filter, sort_rows, viability_quadrants, QuadrantCounts, SortKey, SortOrder, TaskFilter,
};
pub use stats::{summary_statistics, SummaryStats};

/// Threshold the dashboard uses to split the desire/capability plane into
/// viability quadrants.
pub const DEFAULT_QUADRANT_THRESHOLD: f64 = 3.5;
