use crate::model::{PatientProfile, Provenance, Recommendation};
use crate::providers::{build_recommender_prompt, RecommendationProvider};
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;

/// Citation stamped on every generated recommendation, regardless of what
/// the service returned.
pub const GENERATED_REFERENCE: &str = "AI-Powered Nutritional Analysis";

/// Combined recommendation quota across both sources.
const COMBINED_TARGET: usize = 6;

/// Minimum number of generated recommendations to request.
const MIN_GENERATED: usize = 2;

/// How many additional foods to request from the generative service.
///
/// Always at least 2; tops up toward a combined total of 6 when the
/// reference table supplied fewer than 4 matches.
pub fn target_count(db_count: usize) -> usize {
    MIN_GENERATED.max(COMBINED_TARGET.saturating_sub(db_count))
}

/// One entry of the service's JSON array. Unknown fields (including any
/// `source`/`reference` the model supplies) are ignored; provenance and
/// citation are forced after parsing.
#[derive(Debug, Deserialize)]
struct GeneratedEntry {
    food: String,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    mechanism: String,
    #[serde(default)]
    nutrients: Vec<String>,
}

/// Request additional food recommendations from the generative service.
///
/// Makes exactly one provider call bounded by `request_timeout` - no
/// retries. Every failure mode (transport error, timeout, non-JSON text,
/// wrong shape) substitutes the fixed fallback entry so the caller never
/// sees an error from this stage.
pub async fn generate_recommendations(
    provider: &dyn RecommendationProvider,
    supplements: &[String],
    patient_info: &PatientProfile,
    db_count: usize,
    request_timeout: Duration,
) -> Vec<Recommendation> {
    let count = target_count(db_count);
    let prompt = build_recommender_prompt(supplements, patient_info, count);

    let response = match timeout(request_timeout, provider.recommend(&prompt)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(
                "Provider {} failed, using fallback recommendation: {}",
                provider.provider_name(),
                e
            );
            return vec![fallback_recommendation()];
        }
        Err(_) => {
            warn!(
                "Provider {} timed out after {:?}, using fallback recommendation",
                provider.provider_name(),
                request_timeout
            );
            return vec![fallback_recommendation()];
        }
    };

    match parse_recommendations(&response) {
        Ok(recommendations) => {
            debug!(
                "Provider {} returned {} generated recommendations",
                provider.provider_name(),
                recommendations.len()
            );
            recommendations
        }
        Err(e) => {
            warn!(
                "Unparseable provider response, using fallback recommendation: {}",
                e
            );
            vec![fallback_recommendation()]
        }
    }
}

/// Parse the raw model text as a JSON array of recommendation entries.
///
/// Tolerates a fenced code block around the array. Provenance and
/// citation are forced on every entry.
pub fn parse_recommendations(response: &str) -> Result<Vec<Recommendation>, serde_json::Error> {
    let entries: Vec<GeneratedEntry> = serde_json::from_str(strip_code_fence(response))?;

    Ok(entries
        .into_iter()
        .map(|entry| Recommendation {
            food: entry.food,
            reason: entry.reason,
            mechanism: entry.mechanism,
            nutrients: entry.nutrients,
            source: Provenance::Generated,
            reference: GENERATED_REFERENCE.to_string(),
        })
        .collect())
}

/// The fixed recommendation substituted whenever the generative service
/// cannot deliver. Always a single entry, whatever the target count was.
pub fn fallback_recommendation() -> Recommendation {
    Recommendation {
        food: "Black Seed (Nigella Sativa)".to_string(),
        reason: "Traditional superfood with multiple benefits".to_string(),
        mechanism: "Contains thymoquinone which enhances immune function and has anti-inflammatory properties".to_string(),
        nutrients: vec![
            "Thymoquinone".to_string(),
            "Omega-3".to_string(),
            "Iron".to_string(),
        ],
        source: Provenance::Generated,
        reference: GENERATED_REFERENCE.to_string(),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
