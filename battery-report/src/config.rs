//! Report configuration types
//!
//! Where the pipeline reads from and writes to. The layout of the charts and
//! documents is fixed and not configurable.

use crate::types::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file name of the page (PDF) report
pub const DEFAULT_PDF_PATH: &str = "battery_report.pdf";

/// Default file name of the rich-text (DOCX) report
pub const DEFAULT_DOCX_PATH: &str = "battery_report.docx";

/// Configuration for one report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory the two chart images are written to (created if missing)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Path of the page report (default: `battery_report.pdf` in the working directory)
    #[serde(default = "default_pdf_path")]
    pub pdf_path: PathBuf,

    /// Path of the rich-text report (default: `battery_report.docx` in the working directory)
    #[serde(default = "default_docx_path")]
    pub docx_path: PathBuf,

    /// Field delimiter of the input file (None = by extension, `,` or tab for `.tsv`)
    #[serde(default)]
    pub delimiter: Option<char>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_pdf_path() -> PathBuf {
    PathBuf::from(DEFAULT_PDF_PATH)
}

fn default_docx_path() -> PathBuf {
    PathBuf::from(DEFAULT_DOCX_PATH)
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pdf_path: default_pdf_path(),
            docx_path: default_docx_path(),
            delimiter: None,
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the chart output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method: set the page report path
    pub fn with_pdf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.pdf_path = path.into();
        self
    }

    /// Builder method: set the rich-text report path
    pub fn with_docx_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.docx_path = path.into();
        self
    }

    /// Builder method: force the input field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Delimiter to use for `input`: the explicit one, else tab for `.tsv`, else comma
    ///
    /// An explicit delimiter outside ASCII is rejected with
    /// [`ReportError::InvalidData`].
    pub fn delimiter_for(&self, input: &Path) -> Result<u8> {
        if let Some(delimiter) = self.delimiter {
            return u8::try_from(delimiter)
                .ok()
                .filter(u8::is_ascii)
                .ok_or_else(|| {
                    ReportError::InvalidData(format!(
                        "delimiter must be a single ASCII character, got {:?}",
                        delimiter
                    ))
                });
        }

        let is_tsv = input
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.eq_ignore_ascii_case("tsv"))
            .unwrap_or(false);

        Ok(if is_tsv { b'\t' } else { b',' })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_config_defaults() {
        let config = ReportConfig::new();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.pdf_path, PathBuf::from("battery_report.pdf"));
        assert_eq!(config.docx_path, PathBuf::from("battery_report.docx"));
        assert_eq!(config.delimiter, None);
    }

    #[test]
    fn test_report_config_builder() {
        let config = ReportConfig::new()
            .with_output_dir("plots")
            .with_pdf_path("out/report.pdf")
            .with_docx_path("out/report.docx")
            .with_delimiter(';');

        assert_eq!(config.output_dir, PathBuf::from("plots"));
        assert_eq!(config.pdf_path, PathBuf::from("out/report.pdf"));
        assert_eq!(config.docx_path, PathBuf::from("out/report.docx"));
        assert_eq!(config.delimiter, Some(';'));
    }

    #[test]
    fn test_delimiter_selection() {
        let config = ReportConfig::new();
        assert_eq!(config.delimiter_for(Path::new("run.csv")).unwrap(), b',');
        assert_eq!(config.delimiter_for(Path::new("run.TSV")).unwrap(), b'\t');
        assert_eq!(config.delimiter_for(Path::new("run")).unwrap(), b',');

        let forced = ReportConfig::new().with_delimiter(';');
        assert_eq!(forced.delimiter_for(Path::new("run.tsv")).unwrap(), b';');
    }

    #[test]
    fn test_non_ascii_delimiter_is_not_truncated() {
        // 'ĺ' (U+013A) would truncate to b':'
        for delimiter in ['é', '§', 'ĺ'] {
            let config = ReportConfig::new().with_delimiter(delimiter);
            assert!(matches!(
                config.delimiter_for(Path::new("run.csv")),
                Err(ReportError::InvalidData(_))
            ));
        }
    }
}
