use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::extractor::{extract_profile, extract_supplements};
use crate::model::{AnalysisRecord, CsvRow, Recommendation};
use crate::providers::{ProviderFactory, RecommendationProvider};
use crate::recommender::generate_recommendations;
use crate::reference::ReferenceTable;
use crate::report::render_report;
use chrono::Utc;
use log::{debug, warn};
use std::io::Read;
use std::time::Duration;

/// Everything one row analysis needs, constructed explicitly up front.
/// There is no ambient global state: the reference table is loaded once
/// and the provider is injected.
pub struct AnalysisContext {
    reference: ReferenceTable,
    provider: Box<dyn RecommendationProvider>,
    timeout: Duration,
}

impl AnalysisContext {
    pub fn new(
        reference: ReferenceTable,
        provider: Box<dyn RecommendationProvider>,
        timeout: Duration,
    ) -> Self {
        AnalysisContext {
            reference,
            provider,
            timeout,
        }
    }

    /// Build a context from configuration: loads the reference table
    /// (degrading to empty on failure) and instantiates the default
    /// provider.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        let provider = ProviderFactory::get_default_provider(config)
            .map_err(|e| AnalysisError::ProviderError(e.to_string()))?;

        Ok(AnalysisContext {
            reference: ReferenceTable::load(&config.reference_table),
            provider,
            timeout: Duration::from_secs(config.timeout),
        })
    }

}

/// Database recommendations first, generated ones after. No re-ranking,
/// deduplication or trimming happens here; the DB cap and the generative
/// target count already bound the total.
pub fn merge_recommendations(
    database: Vec<Recommendation>,
    generated: Vec<Recommendation>,
) -> Vec<Recommendation> {
    let mut merged = database;
    merged.extend(generated);
    merged
}

/// Run the full pipeline for one CSV row.
///
/// Returns `None` when the row yields no supplement labels - such rows are
/// excluded from processing entirely. Otherwise this cannot fail: the
/// matcher degrades to zero matches and the recommender substitutes its
/// fallback, so every row with supplements produces a record.
pub async fn analyze_row(ctx: &AnalysisContext, row: CsvRow) -> Option<AnalysisRecord> {
    let supplements = extract_supplements(&row);
    if supplements.is_empty() {
        debug!("Row has no supplement columns set, skipping");
        return None;
    }

    let patient_info = extract_profile(&row, supplements.clone());

    let db_matches = ctx.reference.match_foods(&supplements);
    let generated = generate_recommendations(
        ctx.provider.as_ref(),
        &supplements,
        &patient_info,
        db_matches.len(),
        ctx.timeout,
    )
    .await;

    let recommendations = merge_recommendations(db_matches, generated);

    let created_at = Utc::now();
    let report_html = render_report(
        &patient_info,
        &supplements,
        &recommendations,
        &created_at.to_rfc3339(),
    );

    Some(AnalysisRecord {
        patient_info,
        patient_data: row.into_pairs(),
        supplements,
        recommendations,
        report_html,
        created_at,
    })
}

/// Analyze a batch of rows sequentially. Rows are independent; one row's
/// outcome never affects another's.
pub async fn analyze_rows(ctx: &AnalysisContext, rows: Vec<CsvRow>) -> Vec<AnalysisRecord> {
    let mut records = Vec::new();
    for row in rows {
        if let Some(record) = analyze_row(ctx, row).await {
            records.push(record);
        }
    }
    records
}

/// Decode CSV input into ordered rows.
///
/// Undecodable rows are logged and skipped rather than aborting the batch;
/// only an unreadable header is fatal.
pub fn rows_from_reader<R: Read>(reader: R) -> Result<Vec<CsvRow>, AnalysisError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        match result {
            Ok(record) => {
                let row: CsvRow = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(header, value)| (header.to_string(), value.to_string()))
                    .collect();
                rows.push(row);
            }
            Err(e) => warn!("Skipping unreadable CSV row: {}", e),
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Provenance, ReferenceFoodEntry};
    use async_trait::async_trait;
    use std::error::Error;

    struct StaticProvider {
        body: String,
    }

    #[async_trait]
    impl RecommendationProvider for StaticProvider {
        fn provider_name(&self) -> &str {
            "static"
        }

        async fn recommend(&self, _prompt: &str) -> Result<String, Box<dyn Error>> {
            Ok(self.body.clone())
        }
    }

    fn context(body: &str) -> AnalysisContext {
        AnalysisContext::new(
            ReferenceTable::new(vec![ReferenceFoodEntry {
                name: "Orange".to_string(),
                nutrients: "vitamin c, fiber".to_string(),
            }]),
            Box::new(StaticProvider {
                body: body.to_string(),
            }),
            Duration::from_secs(5),
        )
    }

    fn rec(food: &str, source: Provenance) -> Recommendation {
        Recommendation {
            food: food.to_string(),
            reason: "r".to_string(),
            mechanism: "m".to_string(),
            nutrients: Vec::new(),
            source,
            reference: String::new(),
        }
    }

    #[test]
    fn test_merge_keeps_database_first() {
        let merged = merge_recommendations(
            vec![rec("a", Provenance::Database), rec("b", Provenance::Database)],
            vec![rec("c", Provenance::Generated)],
        );

        let foods: Vec<&str> = merged.iter().map(|r| r.food.as_str()).collect();
        assert_eq!(foods, vec!["a", "b", "c"]);
        assert_eq!(merged[0].source, Provenance::Database);
        assert_eq!(merged[2].source, Provenance::Generated);
    }

    #[test]
    fn test_merge_does_not_deduplicate() {
        let merged = merge_recommendations(
            vec![rec("same", Provenance::Database)],
            vec![rec("same", Provenance::Generated)],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_rows_from_reader() {
        let csv_text = "patient_id,vitamin_c,age\nP1,Yes,40\nP2,No,31\n";
        let rows = rows_from_reader(csv_text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("patient_id"), Some("P1"));
        assert_eq!(rows[0].get("vitamin_c"), Some("Yes"));
        assert_eq!(rows[1].get("vitamin_c"), Some("No"));
    }

    #[tokio::test]
    async fn test_analyze_row_end_to_end() {
        let ctx = context(
            r#"[{"food": "Moringa", "reason": "r", "mechanism": "m", "nutrients": ["iron"]}]"#,
        );

        let row = rows_from_reader("patient_id,vitamin_c,age\nP1,Yes,40\n".as_bytes())
            .unwrap()
            .remove(0);

        let record = analyze_row(&ctx, row).await.unwrap();
        assert_eq!(record.supplements, vec!["Vitamin C"]);
        assert_eq!(record.patient_info.patient_id, "P1");
        assert_eq!(record.patient_info.age, "40");

        // one database match followed by the generated entries
        assert_eq!(record.recommendations.len(), 2);
        assert_eq!(record.recommendations[0].food, "Orange");
        assert_eq!(record.recommendations[0].source, Provenance::Database);
        assert_eq!(record.recommendations[1].food, "Moringa");
        assert_eq!(record.recommendations[1].source, Provenance::Generated);

        assert!(record.report_html.contains("Orange"));
        assert!(record.report_html.contains("Moringa"));
    }

    #[tokio::test]
    async fn test_row_without_supplements_is_excluded() {
        let ctx = context("[]");
        let row = rows_from_reader("patient_id,age\nP1,40\n".as_bytes())
            .unwrap()
            .remove(0);

        assert!(analyze_row(&ctx, row).await.is_none());
    }

    #[tokio::test]
    async fn test_analyze_rows_skips_and_keeps_independently() {
        let ctx = context("[]");
        let rows = rows_from_reader(
            "patient_id,vitamin_c\nP1,Yes\nP2,No\nP3,yes\n".as_bytes(),
        )
        .unwrap();

        let records = analyze_rows(&ctx, rows).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].patient_info.patient_id, "P1");
        assert_eq!(records[1].patient_info.patient_id, "P3");
    }
}
