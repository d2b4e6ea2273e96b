//! Experiment data loading
//!
//! Reads a delimited text file with a header row into an [`ExperimentTable`].
//! Column types are inferred by the CSV reader; the required columns are not
//! checked here and only fail when a later step asks for them.

use crate::config::ReportConfig;
use crate::types::{ExperimentTable, ReportError, Result};
use polars::prelude::*;
use std::path::Path;

/// Number of leading rows used for column type inference
const INFER_SCHEMA_ROWS: usize = 1000;

/// Load an experiment recording using the delimiter chosen by `config`
///
/// Any failure is logged with its cause and returned as
/// [`ReportError::DataLoad`].
pub fn load_experiment_data(path: &Path, config: &ReportConfig) -> Result<ExperimentTable> {
    log::info!("Loading experiment data: {:?}", path);

    match read_table(path, config) {
        Ok(table) => {
            log::debug!(
                "Loaded {} rows with columns {:?}",
                table.height(),
                table.column_names()
            );
            Ok(table)
        }
        Err(reason) => {
            log::error!("Error loading data from {:?}: {}", path, reason);
            Err(ReportError::DataLoad {
                path: path.to_path_buf(),
                reason,
            })
        }
    }
}

fn read_table(path: &Path, config: &ReportConfig) -> std::result::Result<ExperimentTable, String> {
    let separator = config.delimiter_for(path).map_err(|e| e.to_string())?;

    let metadata = std::fs::metadata(path).map_err(|e| e.to_string())?;
    if !metadata.is_file() {
        return Err("not a regular file".to_string());
    }

    let frame = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_separator(separator)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| e.to_string())?;

    Ok(ExperimentTable::new(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reading;
    use std::fs;

    #[test]
    fn test_load_csv_infers_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        fs::write(
            &path,
            "time,voltage,temperature\n0,4.2,20\n1,4.0,22\n2,3.8,21\n",
        )
        .unwrap();

        let table = load_experiment_data(&path, &ReportConfig::new()).unwrap();
        assert_eq!(table.height(), 3);
        assert_eq!(
            table.column("time").unwrap(),
            vec![Reading::Integer(0), Reading::Integer(1), Reading::Integer(2)]
        );
        assert_eq!(
            table.column("voltage").unwrap(),
            vec![Reading::Float(4.2), Reading::Float(4.0), Reading::Float(3.8)]
        );
    }

    #[test]
    fn test_load_tsv_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.tsv");
        fs::write(&path, "time\tvoltage\ttemperature\n0\t4.1\t25\n5\t4.0\t26\n").unwrap();

        let table = load_experiment_data(&path, &ReportConfig::new()).unwrap();
        assert_eq!(table.column_names(), vec!["time", "voltage", "temperature"]);
        assert_eq!(table.height(), 2);
    }

    #[test]
    fn test_load_with_explicit_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.txt");
        fs::write(&path, "time;voltage;temperature\n0;4.2;20\n").unwrap();

        let config = ReportConfig::new().with_delimiter(';');
        let table = load_experiment_data(&path, &config).unwrap();
        assert_eq!(table.column("temperature").unwrap(), vec![Reading::Integer(20)]);
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        fs::write(&path, "time,voltage,temperature\n0,4.2,20\n").unwrap();

        let config = ReportConfig::new().with_delimiter('§');
        let result = load_experiment_data(&path, &config);
        assert!(matches!(result, Err(ReportError::DataLoad { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.csv");

        let result = load_experiment_data(&path, &ReportConfig::new());
        assert!(matches!(result, Err(ReportError::DataLoad { .. })));
    }

    #[test]
    fn test_load_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let result = load_experiment_data(dir.path(), &ReportConfig::new());
        assert!(matches!(result, Err(ReportError::DataLoad { .. })));
    }
}
