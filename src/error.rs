use thiserror::Error;

/// Errors that can occur at the library surface.
///
/// The per-row pipeline itself never returns these: every failure inside a
/// row degrades to a defined default (empty table, fallback entry, row
/// exclusion). The variants here cover the entry points around the
/// pipeline: CSV decoding, configuration, provider construction, storage
/// lookups and file output.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Failed to issue an HTTP request to the generative service
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Failed to decode the uploaded CSV
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Provider could not be constructed
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// No stored analysis under the given identifier
    #[error("Analysis {0} not found")]
    NotFound(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Filesystem error while reading input or writing reports
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
