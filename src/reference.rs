use crate::model::{Provenance, Recommendation, ReferenceFoodEntry};
use log::{debug, warn};
use std::path::Path;

/// Maximum number of recommendations drawn from the reference table.
pub const MAX_DB_MATCHES: usize = 4;

/// The static food reference table, loaded once at startup.
///
/// A missing or corrupt table degrades to an empty one: matching then
/// yields zero database recommendations and the generative top-up covers
/// the whole quota.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: Vec<ReferenceFoodEntry>,
}

impl ReferenceTable {
    pub fn new(entries: Vec<ReferenceFoodEntry>) -> Self {
        ReferenceTable { entries }
    }

    pub fn empty() -> Self {
        ReferenceTable::default()
    }

    /// Load the table from a CSV file with `name,nutrients` columns.
    ///
    /// Never fails: unreadable files and undecodable rows are logged and
    /// skipped, so the worst case is an empty table.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut reader = match csv::Reader::from_path(path) {
            Ok(reader) => reader,
            Err(e) => {
                warn!(
                    "Could not open reference table {}: {} - continuing with an empty table",
                    path.display(),
                    e
                );
                return ReferenceTable::empty();
            }
        };

        let mut entries = Vec::new();
        for result in reader.deserialize::<ReferenceFoodEntry>() {
            match result {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping unreadable reference row: {}", e),
            }
        }

        debug!("Loaded {} reference food entries", entries.len());
        ReferenceTable::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Match supplement labels against the table.
    ///
    /// Entries are scanned in table order and the first [`MAX_DB_MATCHES`]
    /// matches are kept; there is no relevance ranking. One supplement may
    /// match several entries with overlapping nutrient text - matches are
    /// not deduplicated across entries.
    pub fn match_foods(&self, supplements: &[String]) -> Vec<Recommendation> {
        let supplements_lower: Vec<String> = supplements
            .iter()
            .map(|s| s.to_lowercase().replace('_', " "))
            .collect();

        let mut matched = Vec::new();
        for entry in &self.entries {
            let nutrients = entry.nutrients.to_lowercase();

            let matching: Vec<&str> = supplements_lower
                .iter()
                .filter(|supplement| label_matches(supplement, &nutrients))
                .map(|s| s.as_str())
                .collect();

            if !matching.is_empty() {
                let joined = matching.join(", ");
                matched.push(Recommendation {
                    food: entry.name.clone(),
                    reason: format!("Rich in {}", joined),
                    mechanism: format!(
                        "Natural source from our database, scientifically proven to supplement {}",
                        joined
                    ),
                    nutrients: entry.nutrients.split(", ").map(String::from).collect(),
                    source: Provenance::Database,
                    reference: "Clinical Nutrition Database".to_string(),
                });
            }

            if matched.len() == MAX_DB_MATCHES {
                break;
            }
        }

        matched
    }
}

/// Fuzzy match of one supplement label against a lower-cased nutrient
/// string.
///
/// The label's parenthesized dose suffix is stripped, then the entry
/// matches when the cleaned token, the token with "vitamin " collapsed to
/// "vitamin", or the token with all spaces removed appears as a substring.
pub fn label_matches(supplement_lower: &str, nutrients_lower: &str) -> bool {
    let cleaned = supplement_lower
        .split('(')
        .next()
        .unwrap_or(supplement_lower)
        .trim();

    nutrients_lower.contains(cleaned)
        || nutrients_lower.contains(&cleaned.replace("vitamin ", "vitamin"))
        || nutrients_lower.contains(&cleaned.replace(' ', ""))
}
