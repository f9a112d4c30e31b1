use crate::model::{PatientProfile, Provenance, Recommendation};
use html_escape::encode_text;

const REPORT_STYLE: &str = r#"
            body { font-family: 'Arial', sans-serif; padding: 20px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); }
            .container { max-width: 800px; margin: 0 auto; background: white; border-radius: 20px; padding: 40px; box-shadow: 0 20px 60px rgba(0,0,0,0.3); }
            h1 { color: #764ba2; text-align: center; font-size: 2.5em; margin-bottom: 30px; }
            h2 { color: #667eea; border-bottom: 2px solid #667eea; padding-bottom: 10px; margin-top: 30px; }
            .patient-info { background: #f0f4f8; padding: 20px; border-radius: 10px; margin: 20px 0; }
            .patient-info p { margin: 8px 0; color: #2c3e50; }
            .patient-info strong { color: #667eea; }
            .supplement-list { background: #f8f9fa; padding: 20px; border-radius: 10px; margin: 20px 0; }
            .supplement-item { display: inline-block; background: #667eea; color: white; padding: 8px 16px; border-radius: 20px; margin: 5px; font-size: 0.95em; }
            .food-card { background: white; border: 1px solid #e0e0e0; border-radius: 15px; padding: 20px; margin: 20px 0; box-shadow: 0 5px 15px rgba(0,0,0,0.1); }
            .food-name { font-size: 1.3em; font-weight: bold; color: #2c3e50; margin-bottom: 10px; }
            .reason { background: #e8f5e9; padding: 10px; border-radius: 8px; margin: 10px 0; }
            .mechanism { background: #fff3e0; padding: 10px; border-radius: 8px; margin: 10px 0; }
            .nutrients { display: flex; gap: 10px; margin-top: 15px; flex-wrap: wrap; }
            .nutrient-tag { background: #667eea; color: white; padding: 5px 15px; border-radius: 20px; font-size: 0.9em; }
            .timestamp { text-align: center; color: #999; margin-top: 30px; font-size: 0.9em; }
"#;

/// Render one patient's analysis as a self-contained styled HTML document.
///
/// Rendering is total: every recommendation is shown as given, optional
/// fields fall back to placeholders, and nothing here can fail. All
/// interpolated values are HTML-escaped.
pub fn render_report(
    patient_info: &PatientProfile,
    supplements: &[String],
    recommendations: &[Recommendation],
    timestamp: &str,
) -> String {
    let cards: String = recommendations.iter().map(render_card).collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Nutrition Report - {title}</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h1>🍎 Personalized Nutrition Report</h1>
{patient_block}
        <h2>📊 Detected Supplements</h2>
        <div class="supplement-list">
            {supplement_block}
        </div>
        <h2>🥗 Recommended Foods</h2>
{cards}
        <div class="timestamp">Report generated at {timestamp}</div>
    </div>
</body>
</html>
"#,
        title = encode_text(&patient_info.patient_name),
        style = REPORT_STYLE,
        patient_block = render_patient_info(patient_info),
        supplement_block = render_supplements(supplements),
        cards = cards,
        timestamp = encode_text(timestamp),
    )
}

fn render_patient_info(patient_info: &PatientProfile) -> String {
    // Diagnosis row only when there is something to show
    let diagnosis_row = if patient_info.diagnosis.is_empty() {
        String::new()
    } else {
        format!(
            "            <p><strong>Diagnosis/Notes:</strong> {}</p>\n",
            encode_text(&patient_info.diagnosis)
        )
    };

    format!(
        r#"        <div class="patient-info">
            <h2>👤 Patient Information</h2>
            <p><strong>Patient ID:</strong> {id}</p>
            <p><strong>Name:</strong> {name}</p>
            <p><strong>Age:</strong> {age}</p>
            <p><strong>Gender:</strong> {gender}</p>
{diagnosis_row}        </div>
"#,
        id = encode_text(&patient_info.patient_id),
        name = encode_text(&patient_info.patient_name),
        age = encode_text(&patient_info.age),
        gender = encode_text(&patient_info.gender),
        diagnosis_row = diagnosis_row,
    )
}

fn render_supplements(supplements: &[String]) -> String {
    if supplements.is_empty() {
        return "No supplements detected".to_string();
    }

    supplements
        .iter()
        .map(|supplement| {
            format!(
                "<span class=\"supplement-item\">{}</span>",
                encode_text(supplement)
            )
        })
        .collect()
}

fn render_card(recommendation: &Recommendation) -> String {
    let (badge_background, badge_label) = match recommendation.source {
        Provenance::Generated => ("linear-gradient(135deg, #667eea, #764ba2)", "🤖 AI Recommended"),
        Provenance::Database => ("linear-gradient(135deg, #d4af37, #8b7355)", "📚 Clinical Database"),
    };

    let nutrient_tags: String = recommendation
        .nutrients
        .iter()
        .map(|nutrient| {
            format!(
                "<span class=\"nutrient-tag\">{}</span>",
                encode_text(nutrient)
            )
        })
        .collect();

    let reference_line = if recommendation.reference.is_empty() {
        String::new()
    } else {
        format!(
            "            <div style=\"margin-top: 10px; font-size: 0.85em; color: #666; font-style: italic;\">Reference: {}</div>\n",
            encode_text(&recommendation.reference)
        )
    };

    format!(
        r#"        <div class="food-card">
            <div style="display: flex; justify-content: space-between; align-items: start;">
                <div class="food-name">🍽️ {food}</div>
                <span style="background: {badge_background}; color: white; padding: 5px 12px; border-radius: 20px; font-size: 0.8em; font-weight: 600;">{badge_label}</span>
            </div>
            <div class="reason"><strong>Reason:</strong> {reason}</div>
            <div class="mechanism"><strong>Mechanism:</strong> {mechanism}</div>
            <div class="nutrients">{nutrient_tags}</div>
{reference_line}        </div>
"#,
        food = encode_text(&recommendation.food),
        badge_background = badge_background,
        badge_label = badge_label,
        reason = encode_text(&recommendation.reason),
        mechanism = encode_text(&recommendation.mechanism),
        nutrient_tags = nutrient_tags,
        reference_line = reference_line,
    )
}
