//! Report writer trait definition.

use crate::error::Result;
use crate::inventory::Inspection;

/// Trait for writing combined inspection reports across many images.
pub trait ReportWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write the result for one image.
    fn write_entry(&mut self, image_name: &str, inspection: &Inspection) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
