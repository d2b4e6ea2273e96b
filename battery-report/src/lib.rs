//! Battery Experiment Report Library
//!
//! Turns a recorded battery experiment (a delimited file with `time`,
//! `voltage` and `temperature` columns) into two charts and two reports.
//!
//! # Pipeline
//!
//! - Load the recording into an [`ExperimentTable`]
//! - Render `voltage_vs_time.png` and `temperature_vs_time.png`
//! - Write a fixed-layout PDF report
//! - Write a flowing DOCX report
//!
//! Each step is a plain function, so the report builders can be driven with
//! an in-memory table and existing images without touching the plotting
//! backend.
//!
//! # Example Usage
//!
//! ```no_run
//! use battery_report::{generate_report_with, ReportConfig};
//! use std::path::Path;
//!
//! let config = ReportConfig::new()
//!     .with_output_dir("plots")
//!     .with_pdf_path("reports/run_42.pdf")
//!     .with_docx_path("reports/run_42.docx");
//!
//! let report = generate_report_with(Path::new("run_42.csv"), &config).unwrap();
//! println!("Charts: {:?}", report.charts);
//! ```

// Public modules
pub mod charts;
pub mod config;
pub mod docx_report;
pub mod loader;
pub mod pdf_report;
pub mod pipeline;
pub mod summary;
pub mod types;

// Re-export main types for convenience
pub use charts::{generate_plots, ChartPaths, ChartSpec, TEMPERATURE_CHART, VOLTAGE_CHART};
pub use config::{ReportConfig, DEFAULT_DOCX_PATH, DEFAULT_PDF_PATH};
pub use docx_report::generate_word_report;
pub use loader::load_experiment_data;
pub use pdf_report::generate_pdf_report;
pub use pipeline::{generate_report, generate_report_with, GeneratedReport};
pub use summary::Summary;
pub use types::{ExperimentTable, Reading, ReportError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
