mod compare;
mod dataset;
mod error;
mod export;
mod format;
mod metrics;
mod recommend;
mod types;

pub use compare::{compare_spending, diff_color, sorted_spending};
pub use dataset::Dataset;
pub use error::{ExportError, LoadError, Result};
pub use export::{
    ExportRow, SUMMARY_LABELS, export_bytes, export_file_name, export_rows, write_export,
};
pub use format::{format_amount, format_won};
pub use metrics::derive_metrics;
pub use recommend::recommend;
pub use types::{
    CategoryDiff, CustomerRecord, DERIVED_COLUMNS, DerivedMetrics, DiffColor, NAME_COLUMN,
    PopulationStats, RawInputs, Recommendation, RecommendationTone, SPENDING_CATEGORIES,
};
