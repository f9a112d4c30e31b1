use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a recommendation came from.
///
/// Database entries always precede generated entries in a stored record;
/// the report renderer and the merge step both rely on that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Matched against the static reference table
    Database,
    /// Produced by the generative text service (or its fixed fallback)
    Generated,
}

/// A single food recommendation, from either source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub food: String,
    pub reason: String,
    pub mechanism: String,
    pub nutrients: Vec<String>,
    pub source: Provenance,
    pub reference: String,
}

/// Patient identity extracted from one CSV row.
///
/// Every field is materialized: missing id/name become "Unknown",
/// missing age/gender become "N/A", missing diagnosis becomes an empty
/// string (the renderer hides the block when empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub patient_id: String,
    pub patient_name: String,
    pub age: String,
    pub gender: String,
    pub diagnosis: String,
    pub supplements: Vec<String>,
}

/// One row of the static food reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceFoodEntry {
    pub name: String,
    /// Flat comma/space-delimited nutrient tags, e.g. "vitamin c, fiber"
    pub nutrients: String,
}

/// Persisted aggregate of one processed patient row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub patient_info: PatientProfile,
    /// The raw row as (column, value) pairs, in CSV column order
    pub patient_data: Vec<(String, String)>,
    pub supplements: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub report_html: String,
    pub created_at: DateTime<Utc>,
}

/// An ordered column-name -> value mapping for one CSV row.
///
/// Column order is preserved because supplement labels are emitted in
/// column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRow {
    columns: Vec<(String, String)>,
}

impl CsvRow {
    pub fn new(columns: Vec<(String, String)>) -> Self {
        CsvRow { columns }
    }

    /// Value for a column, if the column exists (the value may be empty).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(col, value)| (col.as_str(), value.as_str()))
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, String)> for CsvRow {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        CsvRow {
            columns: iter.into_iter().collect(),
        }
    }
}
