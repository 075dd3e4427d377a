//! Report writers.

mod csv;
mod json;
pub mod progress;
mod text;
mod writer;

pub use csv::CsvSummaryWriter;
pub use json::{
    JsonDetection, JsonInventoryFile, JsonItem, JsonMissing, describe_split, write_json_inventory,
};
pub use text::{TextReportWriter, format_entry};
pub use writer::ReportWriter;
