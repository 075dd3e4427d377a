//! Rejection of implausible detections.

use crate::inventory::{Detection, ImageSize, Manifest};
use tracing::debug;

/// Drop detections outside the manifest or covering too much of the frame.
///
/// A box is kept when its class is a manifest item and its area is at most
/// `max_box_area_ratio * image_area`. Relative order is preserved.
pub fn reject_hallucinations(
    detections: Vec<Detection>,
    image: ImageSize,
    manifest: &Manifest,
    max_box_area_ratio: f64,
) -> Vec<Detection> {
    let max_area = image.area() * max_box_area_ratio;

    detections
        .into_iter()
        .filter(|d| {
            if !manifest.contains(d.class_label()) {
                return false;
            }
            if d.area() > max_area {
                debug!(
                    "Rejected oversized {} box: area {:.0} > {:.0}",
                    d.class_label(),
                    d.area(),
                    max_area
                );
                return false;
            }
            true
        })
        .collect()
}
