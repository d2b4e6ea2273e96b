//! Chart rendering
//!
//! Draws the two fixed line charts of an experiment (voltage and temperature
//! against time) as PNG files with plotters.

use crate::types::{
    ExperimentTable, ReportError, Result, TEMPERATURE_COLUMN, TIME_COLUMN, VOLTAGE_COLUMN,
};
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Pixel size of every chart (8x6 inches at 100 dpi)
pub const CHART_SIZE: (u32, u32) = (800, 600);

/// Fraction of the data span added on each side of an axis
const AXIS_PADDING: f64 = 0.05;

/// Fixed description of one chart
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Column plotted on the y axis (x is always `time`)
    pub y_column: &'static str,
    /// Series name shown in the legend
    pub series_label: &'static str,
    pub color: RGBColor,
    pub legend: bool,
    pub file_name: &'static str,
}

/// Voltage against time, with a legend
pub const VOLTAGE_CHART: ChartSpec = ChartSpec {
    title: "Voltage vs Time",
    x_label: "Time (s)",
    y_label: "Voltage (V)",
    y_column: VOLTAGE_COLUMN,
    series_label: "Voltage",
    color: BLUE,
    legend: true,
    file_name: "voltage_vs_time.png",
};

/// Temperature against time, without a legend
pub const TEMPERATURE_CHART: ChartSpec = ChartSpec {
    title: "Temperature vs Time",
    x_label: "Time (s)",
    y_label: "Temperature (°C)",
    y_column: TEMPERATURE_COLUMN,
    series_label: "Temperature",
    color: RED,
    legend: false,
    file_name: "temperature_vs_time.png",
};

/// Paths of the rendered charts, in report order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPaths {
    pub voltage: PathBuf,
    pub temperature: PathBuf,
}

impl ChartPaths {
    /// Chart paths inside `output_dir` using the fixed file names
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            voltage: output_dir.join(VOLTAGE_CHART.file_name),
            temperature: output_dir.join(TEMPERATURE_CHART.file_name),
        }
    }
}

/// Render both charts into `output_dir`, which must already exist
///
/// Existing files with the same names are overwritten.
pub fn generate_plots(table: &ExperimentTable, output_dir: &Path) -> Result<ChartPaths> {
    let paths = ChartPaths::in_dir(output_dir);

    render_chart(table, &VOLTAGE_CHART, &paths.voltage)?;
    render_chart(table, &TEMPERATURE_CHART, &paths.temperature)?;

    Ok(paths)
}

/// Render one chart to `path`
///
/// Both columns are read before the file is created, so a missing column
/// leaves nothing on disk.
pub fn render_chart(table: &ExperimentTable, spec: &ChartSpec, path: &Path) -> Result<()> {
    let x = table.column_f64(TIME_COLUMN)?;
    let y = table.column_f64(spec.y_column)?;
    if x.is_empty() {
        return Err(ReportError::EmptyTable);
    }

    let x_range = axis_range(&x);
    let y_range = axis_range(&y);
    log::debug!(
        "Rendering '{}' ({} points, x {:?}, y {:?}) to {:?}",
        spec.title,
        x.len(),
        x_range,
        y_range,
        path
    );

    let points: Vec<(f64, f64)> = x.into_iter().zip(y).collect();
    draw_line_chart(spec, points, x_range, y_range, path)
        .map_err(|e| ReportError::Chart(format!("{:?}: {}", path, e)))?;

    log::info!("Chart written: {:?}", path);
    Ok(())
}

fn draw_line_chart(
    spec: &ChartSpec,
    points: Vec<(f64, f64)>,
    x_range: Range<f64>,
    y_range: Range<f64>,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    // Mesh lines double as the grid
    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .draw()?;

    let color = spec.color;
    let series = chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?;

    if spec.legend {
        series
            .label(spec.series_label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Axis range covering `values` with a little padding
///
/// A zero span widens to ±0.5 so single-valued data still gets an axis.
pub fn axis_range(values: &[f64]) -> Range<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }

    let span = max - min;
    if span == 0.0 {
        return (min - 0.5)..(max + 0.5);
    }

    let pad = span * AXIS_PADDING;
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reading;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_axis_range_padding() {
        let range = axis_range(&[0.0, 5.0, 10.0]);
        assert_close(range.start, -0.5);
        assert_close(range.end, 10.5);
    }

    #[test]
    fn test_axis_range_flat_data() {
        let range = axis_range(&[3.7, 3.7]);
        assert_close(range.start, 3.2);
        assert_close(range.end, 4.2);
    }

    #[test]
    fn test_axis_range_empty() {
        assert_eq!(axis_range(&[]), 0.0..1.0);
    }

    #[test]
    fn test_chart_specs() {
        assert_eq!(VOLTAGE_CHART.file_name, "voltage_vs_time.png");
        assert_eq!(VOLTAGE_CHART.y_column, "voltage");
        assert!(VOLTAGE_CHART.legend);

        assert_eq!(TEMPERATURE_CHART.file_name, "temperature_vs_time.png");
        assert_eq!(TEMPERATURE_CHART.y_label, "Temperature (°C)");
        assert!(!TEMPERATURE_CHART.legend);
    }

    #[test]
    fn test_chart_paths_order() {
        let paths = ChartPaths::in_dir(Path::new("out"));
        assert_eq!(paths.voltage, PathBuf::from("out/voltage_vs_time.png"));
        assert_eq!(paths.temperature, PathBuf::from("out/temperature_vs_time.png"));
    }

    #[test]
    fn test_missing_column_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let table = ExperimentTable::from_columns(vec![
            ("time", vec![Reading::Integer(0), Reading::Integer(1)]),
            ("temperature", vec![Reading::Integer(20), Reading::Integer(21)]),
        ])
        .unwrap();

        let result = generate_plots(&table, dir.path());
        assert!(matches!(result, Err(ReportError::MissingField(ref name)) if name == "voltage"));
        assert!(!dir.path().join("voltage_vs_time.png").exists());
        assert!(!dir.path().join("temperature_vs_time.png").exists());
    }
}
