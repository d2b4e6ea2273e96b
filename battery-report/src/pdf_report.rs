//! Page report (PDF)
//!
//! The page is laid out at fixed coordinates by [`page_layout`] and then drawn
//! with printpdf. Coordinates are PDF points with the origin at the bottom
//! left of a US Letter page.

use crate::charts::ChartPaths;
use crate::summary::Summary;
use crate::types::{ExperimentTable, ReportError, Result, IMAGE_SIZE, REPORT_TITLE};
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Pt,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// US Letter page size in points
pub const PAGE_SIZE: (f32, f32) = (612.0, 792.0);

const LEFT_MARGIN: f32 = 100.0;
const TITLE_Y: f32 = 750.0;
const TITLE_FONT_SIZE: f32 = 20.0;
const BODY_FONT_SIZE: f32 = 12.0;
const SUMMARY_Y: [f32; 4] = [720.0, 700.0, 680.0, 660.0];
const VOLTAGE_LABEL_Y: f32 = 620.0;
const VOLTAGE_IMAGE_Y: f32 = 400.0;
const TEMPERATURE_LABEL_Y: f32 = 380.0;
const TEMPERATURE_IMAGE_Y: f32 = 180.0;

/// Resolution the chart images are embedded at before scaling
const IMAGE_DPI: f32 = 300.0;

/// Font weight of a text item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// One positioned element of the page
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    /// A line of text with its baseline at (x, y)
    Text {
        text: String,
        weight: FontWeight,
        size: f32,
        x: f32,
        y: f32,
    },
    /// An image with its lower-left corner at (x, y)
    Image {
        path: PathBuf,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Fixed page layout: title, summary lines, then the two labelled charts
pub fn page_layout(summary: &Summary, charts: &ChartPaths) -> Vec<PageItem> {
    let line = |text: &str, weight, size, y| PageItem::Text {
        text: text.to_string(),
        weight,
        size,
        x: LEFT_MARGIN,
        y,
    };
    let image = |path: &Path, y| PageItem::Image {
        path: path.to_path_buf(),
        x: LEFT_MARGIN,
        y,
        width: IMAGE_SIZE.0,
        height: IMAGE_SIZE.1,
    };

    let mut items = vec![line(REPORT_TITLE, FontWeight::Bold, TITLE_FONT_SIZE, TITLE_Y)];
    for (summary_line, y) in summary.lines().iter().zip(SUMMARY_Y) {
        items.push(line(summary_line.as_str(), FontWeight::Regular, BODY_FONT_SIZE, y));
    }
    items.push(line(
        "Voltage vs Time Plot:",
        FontWeight::Regular,
        BODY_FONT_SIZE,
        VOLTAGE_LABEL_Y,
    ));
    items.push(image(&charts.voltage, VOLTAGE_IMAGE_Y));
    items.push(line(
        "Temperature vs Time Plot:",
        FontWeight::Regular,
        BODY_FONT_SIZE,
        TEMPERATURE_LABEL_Y,
    ));
    items.push(image(&charts.temperature, TEMPERATURE_IMAGE_Y));
    items
}

/// Write the page report for `table` to `output`
///
/// Chart images are decoded before the output file is created, so a missing
/// image leaves no partial PDF behind.
pub fn generate_pdf_report(table: &ExperimentTable, charts: &ChartPaths, output: &Path) -> Result<()> {
    let summary = Summary::from_table(table)?;
    let items = page_layout(&summary, charts);

    let (doc, page, layer) = PdfDocument::new(
        REPORT_TITLE,
        Mm::from(Pt(PAGE_SIZE.0)),
        Mm::from(Pt(PAGE_SIZE.1)),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    for item in &items {
        match item {
            PageItem::Text {
                text,
                weight,
                size,
                x,
                y,
            } => {
                let font: &IndirectFontRef = match weight {
                    FontWeight::Regular => &regular,
                    FontWeight::Bold => &bold,
                };
                layer.use_text(text.as_str(), *size, Mm::from(Pt(*x)), Mm::from(Pt(*y)), font);
            }
            PageItem::Image {
                path,
                x,
                y,
                width,
                height,
            } => draw_image(&layer, path, *x, *y, *width, *height)?,
        }
    }

    let file = File::create(output).map_err(|e| ReportError::filesystem(output, e))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    log::info!("PDF report written: {:?}", output);
    Ok(())
}

/// Place a PNG scaled to exactly `width` x `height` points
fn draw_image(
    layer: &PdfLayerReference,
    path: &Path,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Result<()> {
    let mut file = File::open(path).map_err(|e| ReportError::filesystem(path, e))?;
    let decoder = PngDecoder::new(&mut file)
        .map_err(|e| ReportError::Pdf(format!("{:?}: {}", path, e)))?;
    let image = Image::try_from(decoder)
        .map_err(|e| ReportError::Pdf(format!("{:?}: {}", path, e)))?;

    // Natural size in points at IMAGE_DPI
    let natural_width = image.image.width.0 as f32 * 72.0 / IMAGE_DPI;
    let natural_height = image.image.height.0 as f32 * 72.0 / IMAGE_DPI;

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm::from(Pt(x))),
            translate_y: Some(Mm::from(Pt(y))),
            scale_x: Some(width / natural_width),
            scale_y: Some(height / natural_height),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
    Ok(())
}
