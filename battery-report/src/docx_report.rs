//! Rich-text report (DOCX)
//!
//! Content flows top to bottom as headings, paragraphs and pictures; the
//! block order is fixed by [`document_blocks`].

use crate::charts::ChartPaths;
use crate::summary::Summary;
use crate::types::{ExperimentTable, ReportError, Result, IMAGE_SIZE, REPORT_TITLE};
use docx_rs::{Docx, Paragraph, Pic, Run, Style, StyleType};
use std::fs::File;
use std::path::{Path, PathBuf};

/// English Metric Units per point
const EMU_PER_POINT: u32 = 12_700;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// One block of the flowing document
#[derive(Debug, Clone, PartialEq)]
pub enum DocBlock {
    /// Heading; level 0 is the document title
    Heading { level: u8, text: String },
    Paragraph(String),
    /// Picture with its display size in EMU
    Picture {
        path: PathBuf,
        width_emu: u32,
        height_emu: u32,
    },
}

/// Fixed block sequence: title, conditions, then each chart under its heading
pub fn document_blocks(summary: &Summary, charts: &ChartPaths) -> Vec<DocBlock> {
    let heading = |level, text: &str| DocBlock::Heading {
        level,
        text: text.to_string(),
    };
    let picture = |path: &Path| DocBlock::Picture {
        path: path.to_path_buf(),
        width_emu: IMAGE_SIZE.0 as u32 * EMU_PER_POINT,
        height_emu: IMAGE_SIZE.1 as u32 * EMU_PER_POINT,
    };

    let mut blocks = vec![
        heading(0, REPORT_TITLE),
        heading(1, "Experiment Conditions:"),
    ];
    blocks.extend(summary.lines().into_iter().map(DocBlock::Paragraph));
    blocks.push(heading(1, "Voltage vs Time Plot:"));
    blocks.push(picture(&charts.voltage));
    blocks.push(heading(1, "Temperature vs Time Plot:"));
    blocks.push(picture(&charts.temperature));
    blocks
}

/// Write the rich-text report for `table` to `output`
///
/// Chart images are read before the output file is created.
pub fn generate_word_report(table: &ExperimentTable, charts: &ChartPaths, output: &Path) -> Result<()> {
    let summary = Summary::from_table(table)?;

    let mut docx = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(56),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        );

    for block in document_blocks(&summary, charts) {
        let paragraph = match block {
            DocBlock::Heading { level, text } => {
                let style = if level == 0 { "Title" } else { "Heading1" };
                Paragraph::new().add_run(Run::new().add_text(text)).style(style)
            }
            DocBlock::Paragraph(text) => Paragraph::new().add_run(Run::new().add_text(text)),
            DocBlock::Picture {
                path,
                width_emu,
                height_emu,
            } => {
                let bytes = read_png(&path)?;
                let pic = Pic::new(&bytes).size(width_emu, height_emu);
                Paragraph::new().add_run(Run::new().add_image(pic))
            }
        };
        docx = docx.add_paragraph(paragraph);
    }

    let file = File::create(output).map_err(|e| ReportError::filesystem(output, e))?;
    docx.build()
        .pack(file)
        .map_err(|e| ReportError::RichText(e.to_string()))?;

    log::info!("DOCX report written: {:?}", output);
    Ok(())
}

/// Read a chart image, rejecting anything that is not a PNG
fn read_png(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| ReportError::filesystem(path, e))?;
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(ReportError::RichText(format!("{:?} is not a PNG image", path)));
    }
    Ok(bytes)
}
