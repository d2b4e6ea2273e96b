//! Core types for the battery report library
//!
//! This module defines the experiment table, the numeric cell type it hands
//! out, and the error taxonomy shared by every pipeline step.

use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Name of the elapsed-time column (seconds)
pub const TIME_COLUMN: &str = "time";
/// Name of the cell voltage column (volts)
pub const VOLTAGE_COLUMN: &str = "voltage";
/// Name of the temperature column (degrees Celsius)
pub const TEMPERATURE_COLUMN: &str = "temperature";

/// Title shared by both reports
pub const REPORT_TITLE: &str = "Battery Experiment Report";

/// Display size of each chart in either report, in points
pub const IMAGE_SIZE: (f32, f32) = (400.0, 200.0);

/// Errors that can occur while generating a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to load experiment data from {path:?}: {reason}")]
    DataLoad { path: PathBuf, reason: String },

    #[error("Missing field: column '{0}' not found in experiment data")]
    MissingField(String),

    #[error("Experiment table has no rows")]
    EmptyTable,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Filesystem error at {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("DOCX generation failed: {0}")]
    RichText(String),
}

impl ReportError {
    /// Wrap an IO error together with the path it happened on
    pub fn filesystem(path: &Path, source: std::io::Error) -> Self {
        ReportError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A single numeric cell from the experiment table
///
/// The storage kind inferred by the CSV reader is kept, because integer
/// columns print as `2` while float columns print as `2.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Value from an integer column
    Integer(i64),
    /// Value from a floating-point column
    Float(f64),
}

impl Reading {
    /// Convert the reading to f64 for plotting and comparisons
    pub fn as_f64(&self) -> f64 {
        match self {
            Reading::Integer(v) => *v as f64,
            Reading::Float(v) => *v,
        }
    }
}

impl serde::Serialize for Reading {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Reading::Integer(v) => serializer.serialize_i64(*v),
            Reading::Float(v) => serializer.serialize_f64(*v),
        }
    }
}

/// Floats outside this magnitude range print in exponent form
const PLAIN_FLOAT_RANGE: std::ops::Range<f64> = 1e-4..1e16;

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Integer(v) => write!(f, "{}", v),
            Reading::Float(v) if v.is_nan() => write!(f, "nan"),
            Reading::Float(v)
                if v.is_finite() && *v != 0.0 && !PLAIN_FLOAT_RANGE.contains(&v.abs()) =>
            {
                write_exponent(f, *v)
            }
            Reading::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Reading::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Shortest mantissa with a signed, two-digit exponent (`1e-05`, `2.5e+20`)
fn write_exponent(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => f.write_str(&formatted),
    }
}

/// Experiment recording loaded into memory
///
/// Columns are looked up by name when they are needed, so an absent column
/// only fails the step that reads it.
#[derive(Debug, Clone)]
pub struct ExperimentTable {
    frame: DataFrame,
}

impl ExperimentTable {
    /// Wrap an already-parsed data frame
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Build a table in memory from named columns of readings
    ///
    /// A column is stored as integers only if every reading in it is an
    /// integer; otherwise the whole column becomes floats.
    pub fn from_columns(columns: Vec<(&str, Vec<Reading>)>) -> Result<Self> {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| {
                if values.iter().all(|v| matches!(v, Reading::Integer(_))) {
                    let ints: Vec<i64> = values
                        .iter()
                        .map(|v| match v {
                            Reading::Integer(i) => *i,
                            Reading::Float(f) => *f as i64,
                        })
                        .collect();
                    Column::new(name.into(), ints)
                } else {
                    let floats: Vec<f64> = values.iter().map(Reading::as_f64).collect();
                    Column::new(name.into(), floats)
                }
            })
            .collect();

        let frame = DataFrame::new(columns)
            .map_err(|e| ReportError::InvalidData(e.to_string()))?;
        Ok(Self { frame })
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Column names in file order
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// All values of a numeric column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<Reading>> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| ReportError::MissingField(name.to_string()))?;

        // Header-only files infer string columns
        if self.frame.height() == 0 {
            return Ok(Vec::new());
        }

        match column.dtype() {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => {}
            other => {
                return Err(ReportError::InvalidData(format!(
                    "column '{}' is not numeric (found {})",
                    name, other
                )))
            }
        }

        let mut readings = Vec::with_capacity(column.len());
        for row in 0..column.len() {
            let value = column
                .get(row)
                .map_err(|e| ReportError::InvalidData(e.to_string()))?;
            let reading = match value {
                AnyValue::Null => {
                    return Err(ReportError::InvalidData(format!(
                        "column '{}' has an empty cell at row {}",
                        name, row
                    )))
                }
                AnyValue::Int8(v) => Reading::Integer(v as i64),
                AnyValue::Int16(v) => Reading::Integer(v as i64),
                AnyValue::Int32(v) => Reading::Integer(v as i64),
                AnyValue::Int64(v) => Reading::Integer(v),
                AnyValue::UInt8(v) => Reading::Integer(v as i64),
                AnyValue::UInt16(v) => Reading::Integer(v as i64),
                AnyValue::UInt32(v) => Reading::Integer(v as i64),
                AnyValue::UInt64(v) => Reading::Integer(v as i64),
                AnyValue::Float32(v) => Reading::Float(v as f64),
                AnyValue::Float64(v) => Reading::Float(v),
                other => {
                    return Err(ReportError::InvalidData(format!(
                        "column '{}' has a non-numeric value at row {}: {}",
                        name, row, other
                    )))
                }
            };
            readings.push(reading);
        }

        Ok(readings)
    }

    /// Numeric column converted to f64, for plotting
    pub fn column_f64(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self.column(name)?.iter().map(Reading::as_f64).collect())
    }
}
