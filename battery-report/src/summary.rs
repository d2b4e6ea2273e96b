//! Summary statistics shown in both reports

use crate::types::{
    ExperimentTable, Reading, ReportError, Result, TEMPERATURE_COLUMN, TIME_COLUMN,
    VOLTAGE_COLUMN,
};
use serde::Serialize;

/// The four headline values of an experiment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Last `time` value (seconds)
    pub duration: Reading,
    /// First `voltage` value (volts)
    pub initial_voltage: Reading,
    /// Last `voltage` value (volts)
    pub final_voltage: Reading,
    /// Smallest `temperature` value (degrees Celsius)
    pub min_temperature: Reading,
    /// Largest `temperature` value (degrees Celsius)
    pub max_temperature: Reading,
}

impl Summary {
    /// Compute the summary from the table
    ///
    /// Fails with [`ReportError::MissingField`] if a column is absent and
    /// [`ReportError::EmptyTable`] if the table has no rows.
    pub fn from_table(table: &ExperimentTable) -> Result<Self> {
        let time = table.column(TIME_COLUMN)?;
        let voltage = table.column(VOLTAGE_COLUMN)?;
        let temperature = table.column(TEMPERATURE_COLUMN)?;

        let duration = *time.last().ok_or(ReportError::EmptyTable)?;
        let initial_voltage = *voltage.first().ok_or(ReportError::EmptyTable)?;
        let final_voltage = *voltage.last().ok_or(ReportError::EmptyTable)?;
        let (min_temperature, max_temperature) =
            min_max(&temperature).ok_or(ReportError::EmptyTable)?;

        Ok(Self {
            duration,
            initial_voltage,
            final_voltage,
            min_temperature,
            max_temperature,
        })
    }

    /// The four summary lines, in report order
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Experiment Duration: {} seconds", self.duration),
            format!("Initial Voltage: {} V", self.initial_voltage),
            format!("Final Voltage: {} V", self.final_voltage),
            format!(
                "Temperature Range: {} - {} °C",
                self.min_temperature, self.max_temperature
            ),
        ]
    }
}

/// Smallest and largest reading; the first one wins on ties
fn min_max(values: &[Reading]) -> Option<(Reading, Reading)> {
    let first = *values.first()?;
    Some(values.iter().skip(1).fold((first, first), |(lo, hi), v| {
        let lo = if v.as_f64() < lo.as_f64() { *v } else { lo };
        let hi = if v.as_f64() > hi.as_f64() { *v } else { hi };
        (lo, hi)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ExperimentTable {
        ExperimentTable::from_columns(vec![
            ("time", vec![Reading::Integer(0), Reading::Integer(1), Reading::Integer(2)]),
            (
                "voltage",
                vec![Reading::Float(4.2), Reading::Float(4.0), Reading::Float(3.8)],
            ),
            (
                "temperature",
                vec![Reading::Integer(20), Reading::Integer(22), Reading::Integer(21)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_values() {
        let summary = Summary::from_table(&sample_table()).unwrap();
        assert_eq!(summary.duration, Reading::Integer(2));
        assert_eq!(summary.initial_voltage, Reading::Float(4.2));
        assert_eq!(summary.final_voltage, Reading::Float(3.8));
        assert_eq!(summary.min_temperature, Reading::Integer(20));
        assert_eq!(summary.max_temperature, Reading::Integer(22));
    }

    #[test]
    fn test_summary_lines() {
        let summary = Summary::from_table(&sample_table()).unwrap();
        assert_eq!(
            summary.lines(),
            [
                "Experiment Duration: 2 seconds".to_string(),
                "Initial Voltage: 4.2 V".to_string(),
                "Final Voltage: 3.8 V".to_string(),
                "Temperature Range: 20 - 22 °C".to_string(),
            ]
        );
    }

    #[test]
    fn test_single_row() {
        let table = ExperimentTable::from_columns(vec![
            ("time", vec![Reading::Float(0.5)]),
            ("voltage", vec![Reading::Float(3.7)]),
            ("temperature", vec![Reading::Float(-5.25)]),
        ])
        .unwrap();

        let summary = Summary::from_table(&table).unwrap();
        assert_eq!(summary.duration, Reading::Float(0.5));
        assert_eq!(summary.initial_voltage, summary.final_voltage);
        assert_eq!(summary.min_temperature, Reading::Float(-5.25));
        assert_eq!(summary.max_temperature, Reading::Float(-5.25));
    }

    #[test]
    fn test_empty_table() {
        let table = ExperimentTable::from_columns(vec![
            ("time", vec![]),
            ("voltage", vec![]),
            ("temperature", vec![]),
        ])
        .unwrap();

        assert!(matches!(
            Summary::from_table(&table),
            Err(ReportError::EmptyTable)
        ));
    }

    #[test]
    fn test_missing_voltage() {
        let table = ExperimentTable::from_columns(vec![
            ("time", vec![Reading::Integer(0)]),
            ("temperature", vec![Reading::Integer(20)]),
        ])
        .unwrap();

        match Summary::from_table(&table) {
            Err(ReportError::MissingField(name)) => assert_eq!(name, "voltage"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_min_max_unordered() {
        let values: Vec<Reading> = [3.0, -1.5, 7.25, 0.0]
            .iter()
            .map(|v| Reading::Float(*v))
            .collect();
        assert_eq!(
            min_max(&values),
            Some((Reading::Float(-1.5), Reading::Float(7.25)))
        );
        assert_eq!(min_max(&[]), None);
    }

    #[test]
    fn test_summary_json() {
        let summary = Summary::from_table(&sample_table()).unwrap();
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["duration"], 2);
        assert_eq!(json["initial_voltage"], 4.2);
        assert_eq!(json["max_temperature"], 22);
    }
}
