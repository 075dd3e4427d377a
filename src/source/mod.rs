//! Detection sources.
//!
//! The object detector runs outside this crate. A [`DetectionSource`] hands
//! its per-image output to the inspector; [`JsonFileSource`] reads the JSON
//! sidecar files a detector run leaves next to each photo.

mod json;

pub use json::{JsonFileSource, parse_detection_file};

use crate::error::Result;
use crate::inventory::{ImageSize, RawDetection};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Detector output for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDetections {
    /// Name of the photographed image, if the detector recorded it.
    #[serde(default)]
    pub image: Option<String>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Raw detections in detector order.
    #[serde(default)]
    pub detections: Vec<RawDetection>,
}

impl ImageDetections {
    /// Image dimensions.
    pub const fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Something that can produce the detections for one input.
pub trait DetectionSource {
    /// Detections for the image identified by `input`.
    fn detections_for(&self, input: &Path) -> Result<ImageDetections>;
}
