use crate::model::PatientProfile;

/// The system prompt used when requesting food recommendations.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const RECOMMENDER_SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// Build the per-request instruction for the generative service.
///
/// Asks for exactly `count` additional foods, steers toward cross-cultural
/// and lesser-known foods unlikely to appear in a standard reference
/// table, and pins down the structured shape of each entry.
pub fn build_recommender_prompt(
    supplements: &[String],
    patient_info: &PatientProfile,
    count: usize,
) -> String {
    let supplements_json =
        serde_json::to_string(supplements).unwrap_or_else(|_| "[]".to_string());
    let patient_json =
        serde_json::to_string(patient_info).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"Based on the following supplements, recommend {count} additional foods not commonly found in standard databases.
Focus on unique, culturally diverse, or lesser-known foods that complement these supplements.

Patient supplements: {supplements_json}
Patient info: {patient_json}

Return a JSON array with this exact structure:
[
    {{
        "food": "Unique food name",
        "reason": "Why this food is recommended",
        "mechanism": "Scientific explanation of how it helps",
        "nutrients": ["nutrient1", "nutrient2"],
        "source": "generated",
        "reference": "AI Analysis based on nutritional science"
    }}
]

Recommend exactly {count} foods. Focus on Middle Eastern, Asian, or other cultural foods."#
    )
}
