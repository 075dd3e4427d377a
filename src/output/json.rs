//! Per-image JSON inventory output.

use crate::config::FilterConfig;
use crate::error::{Error, Result};
use crate::inventory::{Inspection, Manifest, SizeClass, SplitMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON inventory file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonInventoryFile {
    /// Inspected image name.
    pub image: String,
    /// Analysis timestamp.
    pub analysis_date: DateTime<Utc>,
    /// Thresholds the inspection ran with.
    pub thresholds: FilterConfig,
    /// Whether every required item was found.
    pub complete: bool,
    /// Required and found counts in manifest order.
    pub items: Vec<JsonItem>,
    /// Items short of the required count.
    pub missing: Vec<JsonMissing>,
    /// How the size-ambiguous class was split.
    pub size_split: String,
    /// Counted detections, for drawing overlays.
    pub detections: Vec<JsonDetection>,
}

/// Required vs. found count for one manifest item.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonItem {
    /// Item name.
    pub name: String,
    /// Required count.
    pub required: usize,
    /// Counted detections.
    pub found: usize,
}

/// Shortfall for one item.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonMissing {
    /// Item name.
    pub name: String,
    /// Number of pieces missing.
    pub shortfall: usize,
}

/// One counted detection.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDetection {
    /// Final class label.
    pub class: String,
    /// Detector confidence.
    pub confidence: f32,
    /// Box corners `[x1, y1, x2, y2]`.
    #[serde(rename = "box")]
    pub bbox: [f64; 4],
    /// Box area in square pixels.
    pub area: f64,
}

impl JsonInventoryFile {
    /// Build the serializable form of an inspection.
    pub fn new(
        image: &str,
        inspection: &Inspection,
        manifest: &Manifest,
        thresholds: &FilterConfig,
    ) -> Self {
        let report = &inspection.report;

        Self {
            image: image.to_string(),
            analysis_date: Utc::now(),
            thresholds: thresholds.clone(),
            complete: report.is_complete(),
            items: manifest
                .iter()
                .map(|e| JsonItem {
                    name: e.name.clone(),
                    required: e.count,
                    found: report.found_count(&e.name),
                })
                .collect(),
            missing: report
                .missing()
                .iter()
                .map(|m| JsonMissing {
                    name: m.item.clone(),
                    shortfall: m.shortfall,
                })
                .collect(),
            size_split: describe_split(inspection.size_split),
            detections: inspection
                .detections
                .iter()
                .map(|d| JsonDetection {
                    class: d.class_label().to_string(),
                    confidence: d.confidence(),
                    bbox: d.bbox().corners(),
                    area: d.area(),
                })
                .collect(),
        }
    }
}

/// Short human-readable description of the size split branch.
pub fn describe_split(method: SplitMethod) -> String {
    match method {
        SplitMethod::NoneTrusted => "none".to_string(),
        SplitMethod::SizeGap { ratio, .. } => format!("gap (ratio {ratio:.2})"),
        SplitMethod::MajorityVote { winner } => match winner {
            SizeClass::Large => "vote (large)".to_string(),
            SizeClass::Small => "vote (small)".to_string(),
        },
    }
}

/// Write the JSON inventory for one image.
pub fn write_json_inventory(path: &Path, inventory: &JsonInventoryFile) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, inventory).map_err(|e| Error::JsonWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    writer.flush().map_err(|e| Error::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
