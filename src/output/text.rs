//! Plain-text completeness report.

use crate::constants::REPORT_SEPARATOR_WIDTH;
use crate::error::{Error, Result};
use crate::inventory::{Inspection, InventoryReport};
use crate::output::ReportWriter;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes one block per image to a single `report.txt`.
pub struct TextReportWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl TextReportWriter {
    /// Create a new text report writer, truncating any existing file.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::ReportWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::ReportWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl ReportWriter for TextReportWriter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_entry(&mut self, image_name: &str, inspection: &Inspection) -> Result<()> {
        let entry = format_entry(image_name, &inspection.report);
        writeln!(self.writer, "{entry}").map_err(|e| self.io_error(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.io_error(e))
    }
}

/// Format one report block, including the trailing separator line.
pub fn format_entry(image_name: &str, report: &InventoryReport) -> String {
    let mut out = format!("File: {image_name}\n");

    if report.is_complete() {
        out.push_str("STATUS: COMPLETE\n");
    } else {
        out.push_str("STATUS: INCOMPLETE! Missing:\n");
        for missing in report.missing() {
            let _ = writeln!(
                out,
                "  {} - missing {} pcs.",
                missing.item, missing.shortfall
            );
        }
    }

    out.push_str(&"-".repeat(REPORT_SEPARATOR_WIDTH));
    out
}
