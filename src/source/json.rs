//! JSON detection file parsing.
//!
//! Expected layout:
//!
//! ```json
//! {
//!   "image": "kit01.jpg",
//!   "width": 1280,
//!   "height": 960,
//!   "detections": [
//!     { "class": "Gloves", "confidence": 0.91, "box": [10, 20, 110, 220] }
//!   ]
//! }
//! ```

use crate::error::{Error, Result};
use crate::source::{DetectionSource, ImageDetections};
use std::path::Path;

/// Reads `<stem>.detections.json` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileSource;

impl DetectionSource for JsonFileSource {
    fn detections_for(&self, input: &Path) -> Result<ImageDetections> {
        parse_detection_file(input)
    }
}

/// Parse one detection file.
///
/// Individual detections are not validated here; malformed boxes are dropped
/// later by the inspector. Only the image dimensions must be usable.
pub fn parse_detection_file(path: &Path) -> Result<ImageDetections> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::DetectionRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Tolerate a UTF-8 BOM written by some Windows tools
    let contents = contents.strip_prefix('\u{FEFF}').unwrap_or(&contents);

    let parsed: ImageDetections =
        serde_json::from_str(contents).map_err(|e| Error::DetectionParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    if parsed.width == 0 || parsed.height == 0 {
        return Err(Error::InvalidDetectionFile {
            path: path.to_path_buf(),
            message: format!(
                "image dimensions must be positive, got {}x{}",
                parsed.width, parsed.height
            ),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".detections.json").unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_simple_file() {
        let file = write_temp(
            r#"{
                "image": "kit01.jpg",
                "width": 640,
                "height": 480,
                "detections": [
                    { "class": "Gloves", "confidence": 0.91, "box": [10, 20, 110, 220] },
                    { "class": "Scissors", "confidence": 0.4, "box": [5.5, 6.5, 50.0, 60.0] }
                ]
            }"#,
        );

        let parsed = parse_detection_file(file.path()).unwrap();
        assert_eq!(parsed.image.as_deref(), Some("kit01.jpg"));
        assert_eq!(parsed.size().area(), 640.0 * 480.0);
        assert_eq!(parsed.detections.len(), 2);
        assert_eq!(parsed.detections[0].class_label, "Gloves");
        assert_eq!(parsed.detections[1].bbox, [5.5, 6.5, 50.0, 60.0]);
    }

    #[test]
    fn test_parse_without_detections_key() {
        let file = write_temp(r#"{ "width": 10, "height": 10 }"#);
        let parsed = parse_detection_file(file.path()).unwrap();
        assert!(parsed.detections.is_empty());
        assert!(parsed.image.is_none());
    }

    #[test]
    fn test_parse_with_bom() {
        let file = write_temp("\u{FEFF}{ \"width\": 10, \"height\": 10, \"detections\": [] }");
        assert!(parse_detection_file(file.path()).is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let file = write_temp(r#"{ "width": 0, "height": 10 }"#);
        let result = parse_detection_file(file.path());
        assert!(matches!(result, Err(Error::InvalidDetectionFile { .. })));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let file = write_temp("{ not json");
        let result = parse_detection_file(file.path());
        assert!(matches!(result, Err(Error::DetectionParse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = JsonFileSource.detections_for(Path::new("/nonexistent/a.detections.json"));
        assert!(matches!(result, Err(Error::DetectionRead { .. })));
    }
}
