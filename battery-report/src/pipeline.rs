//! Report pipeline
//!
//! Straight-line sequence: load the table, make sure the chart directory
//! exists, render charts, then write the PDF and DOCX reports. The first
//! failure stops the run.

use crate::charts::{generate_plots, ChartPaths};
use crate::config::ReportConfig;
use crate::docx_report::generate_word_report;
use crate::loader::load_experiment_data;
use crate::pdf_report::generate_pdf_report;
use crate::types::{ReportError, Result};
use std::path::{Path, PathBuf};

/// Everything a successful run wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    pub charts: ChartPaths,
    pub pdf: PathBuf,
    pub docx: PathBuf,
}

/// Generate both reports for `input`
///
/// Charts go to `output_dir`; the reports default to `battery_report.pdf`
/// and `battery_report.docx` in the current working directory.
///
/// # Example
/// ```no_run
/// use battery_report::generate_report;
/// use std::path::Path;
///
/// let report = generate_report(Path::new("experiment.csv"), Path::new("plots"), None, None).unwrap();
/// println!("PDF: {:?}", report.pdf);
/// ```
pub fn generate_report(
    input: &Path,
    output_dir: &Path,
    output_pdf: Option<&Path>,
    output_docx: Option<&Path>,
) -> Result<GeneratedReport> {
    let mut config = ReportConfig::new().with_output_dir(output_dir);
    if let Some(pdf) = output_pdf {
        config = config.with_pdf_path(pdf);
    }
    if let Some(docx) = output_docx {
        config = config.with_docx_path(docx);
    }
    generate_report_with(input, &config)
}

/// Generate both reports for `input` as described by `config`
pub fn generate_report_with(input: &Path, config: &ReportConfig) -> Result<GeneratedReport> {
    let table = load_experiment_data(input, config)?;

    if !config.output_dir.exists() {
        log::debug!("Creating output directory: {:?}", config.output_dir);
    }
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| ReportError::filesystem(&config.output_dir, e))?;

    let charts = generate_plots(&table, &config.output_dir)?;

    generate_pdf_report(&table, &charts, &config.pdf_path)?;
    generate_word_report(&table, &charts, &config.docx_path)?;

    log::info!(
        "Report generated: PDF - {}, Word - {}",
        config.pdf_path.display(),
        config.docx_path.display()
    );

    Ok(GeneratedReport {
        charts,
        pdf: config.pdf_path.clone(),
        docx: config.docx_path.clone(),
    })
}
