//! Detection value types.

use serde::{Deserialize, Serialize};

/// Reasons a raw detection is refused before entering the pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedDetection {
    /// A coordinate is NaN or infinite.
    #[error("box has non-finite coordinates")]
    NonFiniteBox,

    /// The box is empty or inverted on at least one axis.
    #[error("degenerate box ({x1}, {y1}, {x2}, {y2})")]
    DegenerateBox {
        /// Left edge.
        x1: f64,
        /// Top edge.
        y1: f64,
        /// Right edge.
        x2: f64,
        /// Bottom edge.
        y2: f64,
    },

    /// Confidence is outside `[0, 1]` or NaN.
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f32),
}

/// Axis-aligned bounding box in source image pixel coordinates.
///
/// Always satisfies `x1 < x2` and `y1 < y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl BoundingBox {
    /// Build a box, rejecting non-finite or degenerate coordinates.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, MalformedDetection> {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(MalformedDetection::NonFiniteBox);
        }
        if x2 <= x1 || y2 <= y1 {
            return Err(MalformedDetection::DegenerateBox { x1, y1, x2, y2 });
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Corner coordinates as `[x1, y1, x2, y2]`.
    pub const fn corners(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Box width in pixels.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Box height in pixels.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Box area in square pixels.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Pixel dimensions of the inspected image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Total image area in square pixels.
    pub fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }
}

/// Detector output for one object before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Detector class name.
    #[serde(rename = "class")]
    pub class_label: String,
    /// Detector confidence.
    pub confidence: f32,
    /// Box corners `[x1, y1, x2, y2]`.
    #[serde(rename = "box")]
    pub bbox: [f64; 4],
}

/// A validated candidate object in one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    #[serde(rename = "class")]
    class_label: String,
    confidence: f32,
    #[serde(rename = "box")]
    bbox: BoundingBox,
}

impl Detection {
    /// Build a detection, validating confidence range.
    pub fn new(
        class_label: impl Into<String>,
        confidence: f32,
        bbox: BoundingBox,
    ) -> Result<Self, MalformedDetection> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(MalformedDetection::ConfidenceOutOfRange(confidence));
        }
        Ok(Self {
            class_label: class_label.into(),
            confidence,
            bbox,
        })
    }

    /// Class label assigned by the detector or by subclassification.
    pub fn class_label(&self) -> &str {
        &self.class_label
    }

    /// Detector confidence.
    pub const fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Bounding box.
    pub const fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Box area in square pixels.
    pub fn area(&self) -> f64 {
        self.bbox.area()
    }

    /// Return the same detection carrying a different label.
    #[must_use]
    pub fn relabel(self, class_label: &str) -> Self {
        Self {
            class_label: class_label.to_string(),
            ..self
        }
    }
}

impl TryFrom<RawDetection> for Detection {
    type Error = MalformedDetection;

    fn try_from(raw: RawDetection) -> Result<Self, Self::Error> {
        let [x1, y1, x2, y2] = raw.bbox;
        let bbox = BoundingBox::new(x1, y1, x2, y2)?;
        Self::new(raw.class_label, raw.confidence, bbox)
    }
}

/// Order by confidence, highest first.
pub(crate) fn by_confidence_desc(a: &Detection, b: &Detection) -> std::cmp::Ordering {
    b.confidence.total_cmp(&a.confidence)
}

/// Order by area, largest first.
pub(crate) fn by_area_desc(a: &Detection, b: &Detection) -> std::cmp::Ordering {
    b.area().total_cmp(&a.area())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_box_area() {
        let bbox = BoundingBox::new(10.0, 20.0, 30.0, 60.0).unwrap();
        assert_eq!(bbox.width(), 20.0);
        assert_eq!(bbox.height(), 40.0);
        assert_eq!(bbox.area(), 800.0);
    }

    #[test]
    fn test_degenerate_box_rejected() {
        assert!(matches!(
            BoundingBox::new(10.0, 0.0, 10.0, 5.0),
            Err(MalformedDetection::DegenerateBox { .. })
        ));
        assert!(matches!(
            BoundingBox::new(0.0, 8.0, 5.0, 2.0),
            Err(MalformedDetection::DegenerateBox { .. })
        ));
    }

    #[test]
    fn test_non_finite_box_rejected() {
        assert_eq!(
            BoundingBox::new(0.0, 0.0, f64::NAN, 5.0),
            Err(MalformedDetection::NonFiniteBox)
        );
        assert_eq!(
            BoundingBox::new(0.0, 0.0, f64::INFINITY, 5.0),
            Err(MalformedDetection::NonFiniteBox)
        );
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(Detection::new("Gloves", 1.2, bbox).is_err());
        assert!(Detection::new("Gloves", -0.1, bbox).is_err());
        assert!(Detection::new("Gloves", f32::NAN, bbox).is_err());
        assert!(Detection::new("Gloves", 1.0, bbox).is_ok());
    }

    #[test]
    fn test_relabel_keeps_box_and_confidence() {
        let bbox = BoundingBox::new(0.0, 0.0, 4.0, 5.0).unwrap();
        let original = Detection::new("Large bandage", 0.7, bbox).unwrap();
        let relabeled = original.clone().relabel("small bandage");
        assert_eq!(relabeled.class_label(), "small bandage");
        assert_eq!(relabeled.confidence(), 0.7);
        assert_eq!(relabeled.bbox(), original.bbox());
        assert_eq!(original.class_label(), "Large bandage");
    }

    #[test]
    fn test_raw_detection_conversion() {
        let raw = RawDetection {
            class_label: "Scissors".to_string(),
            confidence: 0.5,
            bbox: [1.0, 2.0, 3.0, 4.0],
        };
        let detection = Detection::try_from(raw).unwrap();
        assert_eq!(detection.class_label(), "Scissors");
        assert_eq!(detection.area(), 4.0);
    }

    #[test]
    fn test_image_area() {
        let size = ImageSize {
            width: 1280,
            height: 960,
        };
        assert_eq!(size.area(), 1_228_800.0);
    }
}
