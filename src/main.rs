use log::debug;
use std::env;
use std::path::Path;

use nutrition_report::{analyze_csv, AnalysisContext, AnalysisStore, AppConfig, MemoryStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the CSV path from command-line arguments
    let args: Vec<String> = env::args().collect();
    let csv_path = args
        .get(1)
        .ok_or("Please provide a patient CSV file as an argument")?;
    let output_dir = args.get(2).map(String::as_str).unwrap_or("reports");

    let config = AppConfig::load()?;
    debug!("Using provider '{}'", config.default_provider);
    let ctx = AnalysisContext::from_config(&config)?;

    let csv_text = tokio::fs::read_to_string(csv_path).await?;
    let records = analyze_csv(&csv_text, &ctx).await?;

    tokio::fs::create_dir_all(output_dir).await?;
    let store = MemoryStore::new();

    let total = records.len();
    for record in records {
        let summary = format!(
            "{} ({}): {} supplements, {} recommendations",
            record.patient_info.patient_name,
            record.patient_info.patient_id,
            record.supplements.len(),
            record.recommendations.len()
        );

        let report_html = record.report_html.clone();
        let id = store.insert(record);
        let report_path = Path::new(output_dir).join(format!("nutrition_report_{}.html", id));
        tokio::fs::write(&report_path, report_html).await?;

        println!("{} -> {}", summary, report_path.display());
    }

    println!("Successfully analyzed {} patients", total);
    Ok(())
}
