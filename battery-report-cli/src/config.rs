//! Configuration file loading
//!
//! An optional `report.toml` can name the input recording and the output
//! locations; command-line arguments override it.

use anyhow::{bail, Context, Result};
use battery_report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration (loaded from report.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub file: Option<PathBuf>,
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
    pub docx: Option<PathBuf>,
}

impl AppConfig {
    /// Library configuration for the values set in this file
    pub fn report_config(&self) -> ReportConfig {
        let mut config = ReportConfig::new();
        if let Some(dir) = &self.output.dir {
            config = config.with_output_dir(dir);
        }
        if let Some(pdf) = &self.output.pdf {
            config = config.with_pdf_path(pdf);
        }
        if let Some(docx) = &self.output.docx {
            config = config.with_docx_path(docx);
        }
        if let Some(delimiter) = self.input.delimiter {
            config = config.with_delimiter(delimiter);
        }
        config
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if let Some(delimiter) = config.input.delimiter {
        if !delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got {:?}", delimiter);
        }
    }

    Ok(config)
}
