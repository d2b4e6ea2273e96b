//! Generate both battery reports for a recording
//!
//! Usage:
//!   cargo run -p battery-report --example generate_report -- [data.csv] [output_dir]
//!
//! Without arguments the bundled sample recording is used and everything is
//! written under `target/battery-report-demo/`.

use battery_report::{generate_report_with, load_experiment_data, ReportConfig, Summary};
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let input = args.get(1).map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/data/sample_experiment.csv")
    });
    let output_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/battery-report-demo"));

    let config = ReportConfig::new()
        .with_output_dir(output_dir.join("plots"))
        .with_pdf_path(output_dir.join("battery_report.pdf"))
        .with_docx_path(output_dir.join("battery_report.docx"));

    let table = load_experiment_data(&input, &config)?;
    println!("Loaded {} rows from {:?}", table.height(), input);
    for line in Summary::from_table(&table)?.lines() {
        println!("  {}", line);
    }

    let report = generate_report_with(&input, &config)?;
    println!("\nCharts:");
    println!("  {:?}", report.charts.voltage);
    println!("  {:?}", report.charts.temperature);
    println!("Reports:");
    println!("  {:?}", report.pdf);
    println!("  {:?}", report.docx);

    Ok(())
}
