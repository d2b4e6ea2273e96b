//! Battery Report CLI Application
//!
//! Command-line wrapper around the battery-report library:
//! - Loads an experiment recording (CSV/TSV)
//! - Renders the voltage and temperature charts
//! - Writes the PDF and DOCX reports
//! - Optionally prints the summary statistics as JSON

use anyhow::{Context, Result};
use battery_report::{load_experiment_data, ReportConfig, Summary};
use clap::Parser;
use std::path::{Path, PathBuf};

mod config;

/// Battery Report - Turn a battery experiment recording into PDF and DOCX reports
#[derive(Parser, Debug)]
#[command(name = "battery-report")]
#[command(about = "Generate PDF and DOCX reports from a battery experiment recording", long_about = None)]
#[command(version)]
struct Args {
    /// Experiment recording with time, voltage and temperature columns
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory for the chart images (created if missing)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output path of the PDF report (default: battery_report.pdf)
    #[arg(long, value_name = "FILE")]
    pdf: Option<PathBuf>,

    /// Output path of the DOCX report (default: battery_report.docx)
    #[arg(long, value_name = "FILE")]
    docx: Option<PathBuf>,

    /// Field delimiter of the input file (default: ',' or tab for .tsv)
    #[arg(long, value_name = "CHAR")]
    delimiter: Option<char>,

    /// Path to configuration file (report.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the summary statistics as JSON and exit without writing files
    #[arg(long)]
    summary_json: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::debug!("Battery Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using report library v{}", battery_report::VERSION);

    let file_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let Some(input) = args.input.clone().or_else(|| file_config.input.file.clone()) else {
        println!("Battery Report - No input specified");
        println!("\nQuick Start:");
        println!("  battery-report experiment.csv --output-dir plots");
        println!("  battery-report experiment.csv --pdf out/report.pdf --docx out/report.docx");
        println!("\nWith a configuration file:");
        println!("  battery-report --config report.toml");
        println!("\nUse --help for more options");
        return Ok(());
    };

    let report_config = merge_config(&args, file_config.report_config());

    if args.summary_json {
        return print_summary_json(&input, &report_config);
    }

    let report = battery_report::generate_report_with(&input, &report_config)
        .with_context(|| format!("Failed to generate report for {:?}", input))?;

    println!(
        "Report generated: PDF - {}, Word - {}",
        report.pdf.display(),
        report.docx.display()
    );

    Ok(())
}

/// Command-line arguments take precedence over the configuration file
fn merge_config(args: &Args, mut config: ReportConfig) -> ReportConfig {
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(pdf) = &args.pdf {
        config = config.with_pdf_path(pdf);
    }
    if let Some(docx) = &args.docx {
        config = config.with_docx_path(docx);
    }
    if let Some(delimiter) = args.delimiter {
        config = config.with_delimiter(delimiter);
    }
    config
}

/// Load the recording and print its summary without writing any files
fn print_summary_json(input: &Path, config: &ReportConfig) -> Result<()> {
    let table = load_experiment_data(input, config)?;
    let summary = Summary::from_table(&table)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
