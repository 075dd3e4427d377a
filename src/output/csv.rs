//! Combined CSV summary, one row per image.

use crate::error::{Error, Result};
use crate::inventory::Inspection;
use crate::output::ReportWriter;
use std::fs::File;
use std::path::{Path, PathBuf};

const HEADER: [&str; 4] = ["File", "Status", "Missing count", "Missing items"];

/// CSV summary writer.
pub struct CsvSummaryWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvSummaryWriter {
    /// Create a new CSV summary writer.
    pub fn new(path: &Path) -> Result<Self> {
        let writer = csv::Writer::from_path(path).map_err(|e| Error::CsvWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    fn csv_error(&self, source: csv::Error) -> Error {
        Error::CsvWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl ReportWriter for CsvSummaryWriter {
    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(HEADER)
            .map_err(|e| self.csv_error(e))
    }

    fn write_entry(&mut self, image_name: &str, inspection: &Inspection) -> Result<()> {
        let report = &inspection.report;
        let status = if report.is_complete() {
            "complete"
        } else {
            "incomplete"
        };
        let missing_count: usize = report.missing().iter().map(|m| m.shortfall).sum();
        let missing_items = report
            .missing()
            .iter()
            .map(|m| format!("{} x{}", m.item, m.shortfall))
            .collect::<Vec<_>>()
            .join("; ");

        self.writer
            .write_record([
                image_name,
                status,
                missing_count.to_string().as_str(),
                missing_items.as_str(),
            ])
            .map_err(|e| self.csv_error(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::ReportWrite {
            path: self.path.clone(),
            source: e,
        })
    }
}
