//! Single file processing pipeline.

use crate::error::Result;
use crate::inventory::{Inspection, Inspector};
use crate::output::{JsonInventoryFile, describe_split, write_json_inventory};
use crate::pipeline::{image_stem, json_output_path};
use crate::source::DetectionSource;
use std::path::Path;
use tracing::{debug, info};

/// Inspect a single detection file and write its per-image output.
///
/// # Arguments
///
/// * `input_path` - Path to the detection file
/// * `source` - Reader turning the input into detector output
/// * `inspector` - Kit inspector with the active thresholds and manifest
/// * `output_dir` - Directory for per-image output files
/// * `write_json` - Whether to write `<stem>.inventory.json`
pub fn process_file(
    input_path: &Path,
    source: &dyn DetectionSource,
    inspector: &Inspector,
    output_dir: &Path,
    write_json: bool,
) -> Result<ProcessResult> {
    use std::time::Instant;

    let start_time = Instant::now();

    info!("Processing: {}", input_path.display());

    let detections = source.detections_for(input_path)?;
    let image_name = detections
        .image
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| image_stem(input_path));

    debug!(
        "{}: {}x{} px, {} raw detections",
        image_name,
        detections.width,
        detections.height,
        detections.detections.len()
    );

    let inspection = inspector.inspect(detections.size(), detections.detections);

    log_inspection(&image_name, &inspection);

    if write_json {
        let output_path = json_output_path(input_path, output_dir);
        debug!("Writing json output: {}", output_path.display());
        let inventory = JsonInventoryFile::new(
            &image_name,
            &inspection,
            inspector.manifest(),
            inspector.filter(),
        );
        write_json_inventory(&output_path, &inventory)?;
    }

    let duration_secs = start_time.elapsed().as_secs_f64();
    debug!("Inspected {} in {:.3}s", image_name, duration_secs);

    Ok(ProcessResult {
        image_name,
        inspection,
        duration_secs,
    })
}

fn log_inspection(image_name: &str, inspection: &Inspection) {
    debug!(
        "Size split for {}: {}",
        image_name,
        describe_split(inspection.size_split)
    );

    for detection in &inspection.detections {
        debug!(
            "  {} (conf {:.2}, area {:.0})",
            detection.class_label(),
            detection.confidence(),
            detection.area()
        );
    }

    let report = &inspection.report;
    if report.is_complete() {
        info!("{}: COMPLETE", image_name);
    } else {
        info!(
            "{}: INCOMPLETE, {} item(s) missing",
            image_name,
            report.missing().len()
        );
        for missing in report.missing() {
            debug!("  [MISSING] {} x{}", missing.item, missing.shortfall);
        }
    }
}

/// Result of processing a single file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Name used for the image in reports.
    pub image_name: String,
    /// Inspection outcome.
    pub inspection: Inspection,
    /// Processing duration in seconds.
    pub duration_secs: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::source::JsonFileSource;
    use tempfile::TempDir;

    const DETECTIONS: &str = r#"{
        "width": 1000,
        "height": 1000,
        "detections": [
            { "class": "Gloves", "confidence": 0.9, "box": [0, 0, 50, 50] },
            { "class": "Scissors", "confidence": 0.8, "box": [100, 100, 150, 180] }
        ]
    }"#;

    #[test]
    fn test_process_file_writes_json_inventory() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("kit07.detections.json");
        std::fs::write(&input, DETECTIONS).unwrap();

        let inspector = Inspector::from_config(&Config::default()).unwrap();
        let result = process_file(&input, &JsonFileSource, &inspector, dir.path(), true).unwrap();

        assert_eq!(result.image_name, "kit07");
        assert_eq!(result.inspection.report.found_count("Gloves"), 1);
        assert_eq!(result.inspection.report.found_count("Scissors"), 1);
        assert!(!result.inspection.report.is_complete());

        let written = std::fs::read_to_string(dir.path().join("kit07.inventory.json")).unwrap();
        let parsed: JsonInventoryFile = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.image, "kit07");
        assert_eq!(parsed.detections.len(), 2);
    }

    #[test]
    fn test_process_file_without_json() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("kit08.detections.json");
        std::fs::write(&input, DETECTIONS).unwrap();

        let inspector = Inspector::from_config(&Config::default()).unwrap();
        process_file(&input, &JsonFileSource, &inspector, dir.path(), false).unwrap();

        assert!(!dir.path().join("kit08.inventory.json").exists());
    }

    #[test]
    fn test_process_file_prefers_recorded_image_name() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("x.detections.json");
        std::fs::write(
            &input,
            r#"{ "image": "IMG_0042.jpg", "width": 10, "height": 10 }"#,
        )
        .unwrap();

        let inspector = Inspector::from_config(&Config::default()).unwrap();
        let result = process_file(&input, &JsonFileSource, &inspector, dir.path(), false).unwrap();
        assert_eq!(result.image_name, "IMG_0042.jpg");
        assert_eq!(result.inspection.report.missing().len(), 13);
    }

    #[test]
    fn test_process_file_propagates_parse_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.detections.json");
        std::fs::write(&input, "not json").unwrap();

        let inspector = Inspector::from_config(&Config::default()).unwrap();
        let err = process_file(&input, &JsonFileSource, &inspector, dir.path(), false).unwrap_err();
        assert!(matches!(err, crate::Error::DetectionParse { .. }));
    }
}
