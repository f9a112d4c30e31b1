pub mod config;
pub mod error;
pub mod extractor;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod recommender;
pub mod reference;
pub mod report;
pub mod store;

pub use config::{AppConfig, ProviderConfig};
pub use error::AnalysisError;
pub use model::{
    AnalysisRecord, CsvRow, PatientProfile, Provenance, Recommendation, ReferenceFoodEntry,
};
pub use pipeline::{analyze_row, analyze_rows, merge_recommendations, AnalysisContext};
pub use reference::ReferenceTable;
pub use store::{AnalysisStore, MemoryStore};

use log::info;

/// Analyze every row of a decoded CSV document.
///
/// Rows without supplement signals are excluded; everything else produces
/// an [`AnalysisRecord`] with its rendered report. Only undecodable CSV
/// input is an error.
pub async fn analyze_csv(
    csv_text: &str,
    ctx: &AnalysisContext,
) -> Result<Vec<AnalysisRecord>, AnalysisError> {
    let rows = pipeline::rows_from_reader(csv_text.as_bytes())?;
    let total_rows = rows.len();

    let records = analyze_rows(ctx, rows).await;
    info!(
        "Analyzed {} of {} rows with supplement data",
        records.len(),
        total_rows
    );

    Ok(records)
}
