use crate::model::{CsvRow, PatientProfile};

/// Column-name keywords that mark a column as supplement-related.
/// Matched case-insensitively as substrings of the column name.
const SUPPLEMENT_KEYWORDS: &[&str] = &[
    "vitamin",
    "supplement",
    "iron",
    "calcium",
    "omega",
    "folic",
    "magnesium",
    "zinc",
    "probiotics",
    "coq10",
    "glucosamine",
    "vitamin_a",
    "vitamin_b",
    "vitamin_c",
    "vitamin_d",
    "vitamin_e",
];

/// Derive supplement labels from one CSV row, in column order.
///
/// A column contributes a label when its name contains a supplement keyword
/// and its value is non-empty, non-whitespace and not "no". A "yes" value
/// emits the title-cased column name; a numeric value emits
/// "Name (value)". Any other value emits nothing.
pub fn extract_supplements(row: &CsvRow) -> Vec<String> {
    let mut supplements = Vec::new();

    for (key, value) in row.iter() {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("no") {
            continue;
        }

        let key_lower = key.to_lowercase();
        if !SUPPLEMENT_KEYWORDS
            .iter()
            .any(|keyword| key_lower.contains(keyword))
        {
            continue;
        }

        // the yes/dose checks run on the raw cell value, not the trimmed one
        let supplement_name = title_case(&key.replace('_', " "));
        if value.eq_ignore_ascii_case("yes") {
            supplements.push(supplement_name);
        } else if is_numeric_value(value) {
            supplements.push(format!("{} ({})", supplement_name, value));
        }
    }

    supplements
}

/// Build the patient profile for one row.
///
/// Fallback columns: patient_name falls back to name, diagnosis falls back
/// to notes. Missing fields are materialized, never absent.
pub fn extract_profile(row: &CsvRow, supplements: Vec<String>) -> PatientProfile {
    PatientProfile {
        patient_id: row.get("patient_id").unwrap_or("Unknown").to_string(),
        patient_name: row
            .get("patient_name")
            .or_else(|| row.get("name"))
            .unwrap_or("Unknown")
            .to_string(),
        age: row.get("age").unwrap_or("N/A").to_string(),
        gender: row.get("gender").unwrap_or("N/A").to_string(),
        diagnosis: row
            .get("diagnosis")
            .or_else(|| row.get("notes"))
            .unwrap_or("")
            .to_string(),
        supplements,
    }
}

/// True when the value is all digits once decimal points are removed.
fn is_numeric_value(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| *c != '.').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Capitalize the first letter of each space-separated word.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        CsvRow::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_yes_flag_emits_title_cased_name() {
        let supplements = extract_supplements(&row(&[("calcium", "Yes")]));
        assert_eq!(supplements, vec!["Calcium"]);
    }

    #[test]
    fn test_numeric_value_emits_dose_annotation() {
        let supplements = extract_supplements(&row(&[("vitamin_d", "2000")]));
        assert_eq!(supplements, vec!["Vitamin D (2000)"]);
    }

    #[test]
    fn test_decimal_dose_is_numeric() {
        let supplements = extract_supplements(&row(&[("omega_3", "2.5")]));
        assert_eq!(supplements, vec!["Omega 3 (2.5)"]);
    }

    #[test]
    fn test_no_and_empty_values_skipped() {
        let supplements = extract_supplements(&row(&[
            ("vitamin_c", "No"),
            ("iron", ""),
            ("zinc", "   "),
        ]));
        assert!(supplements.is_empty());
    }

    #[test]
    fn test_non_keyword_columns_ignored() {
        let supplements = extract_supplements(&row(&[
            ("patient_id", "P1"),
            ("age", "40"),
            ("notes", "yes"),
        ]));
        assert!(supplements.is_empty());
    }

    #[test]
    fn test_padded_yes_emits_nothing() {
        // whitespace around the value defeats the exact yes/dose checks
        let supplements = extract_supplements(&row(&[("calcium", " yes ")]));
        assert!(supplements.is_empty());
    }

    #[test]
    fn test_free_text_value_emits_nothing() {
        // keyword column but neither "yes" nor numeric
        let supplements = extract_supplements(&row(&[("vitamin_d", "twice daily")]));
        assert!(supplements.is_empty());
    }

    #[test]
    fn test_labels_follow_column_order() {
        let supplements = extract_supplements(&row(&[
            ("zinc", "yes"),
            ("calcium", "500"),
            ("iron", "Yes"),
        ]));
        assert_eq!(supplements, vec!["Zinc", "Calcium (500)", "Iron"]);
    }

    #[test]
    fn test_profile_fallback_columns() {
        let profile = extract_profile(
            &row(&[("name", "Jane Doe"), ("notes", "anemia")]),
            vec!["Iron".to_string()],
        );
        assert_eq!(profile.patient_name, "Jane Doe");
        assert_eq!(profile.diagnosis, "anemia");
        assert_eq!(profile.patient_id, "Unknown");
        assert_eq!(profile.age, "N/A");
        assert_eq!(profile.gender, "N/A");
        assert_eq!(profile.supplements, vec!["Iron"]);
    }

    #[test]
    fn test_profile_prefers_primary_columns() {
        let profile = extract_profile(
            &row(&[
                ("patient_name", "Primary"),
                ("name", "Secondary"),
                ("diagnosis", "dx"),
                ("notes", "n"),
            ]),
            Vec::new(),
        );
        assert_eq!(profile.patient_name, "Primary");
        assert_eq!(profile.diagnosis, "dx");
    }

    #[test]
    fn test_is_numeric_value() {
        assert!(is_numeric_value("2000"));
        assert!(is_numeric_value("2.5"));
        assert!(!is_numeric_value("."));
        assert!(!is_numeric_value("2000 IU"));
        assert!(!is_numeric_value("yes"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("vitamin d"), "Vitamin D");
        assert_eq!(title_case("folic acid supplement"), "Folic Acid Supplement");
        assert_eq!(title_case("COQ10"), "Coq10");
    }
}
