//! Kit inventory inspection.
//!
//! Turns raw detector output for one image into an [`InventoryReport`]:
//!
//! 1. malformed and below-floor detections are dropped,
//! 2. [`reject_hallucinations`] removes unknown classes and oversized boxes,
//! 3. [`SizeSubclassifier`] splits the size-ambiguous class,
//! 4. [`select_by_tier`] picks the best detections for every other class,
//! 5. [`reconcile`] compares the survivors with the [`Manifest`].
//!
//! Every stage takes and returns owned values; nothing is shared between
//! images.

mod detection;
mod hallucination;
mod manifest;
mod reconcile;
mod selector;
mod subclassify;

pub use detection::{BoundingBox, Detection, ImageSize, MalformedDetection, RawDetection};
pub use hallucination::reject_hallucinations;
pub use manifest::{Manifest, ManifestEntry, SizeClass, SizeGroup};
pub use reconcile::{InventoryReport, MissingItem, reconcile};
pub use selector::{select_by_tier, select_for_class};
pub use subclassify::{SizeSplit, SizeSubclassifier, SplitMethod};

use crate::config::{Config, FilterConfig, validate_config};
use crate::error::Result;
use tracing::{debug, warn};

/// Result of inspecting one image.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Completeness verdict.
    pub report: InventoryReport,
    /// Detections that were counted, for overlay rendering.
    pub detections: Vec<Detection>,
    /// How the size-ambiguous class was split.
    pub size_split: SplitMethod,
}

/// Stateless per-image inspector holding the immutable kit definition.
#[derive(Debug, Clone)]
pub struct Inspector {
    manifest: Manifest,
    size_group: SizeGroup,
    filter: FilterConfig,
}

impl Inspector {
    /// Create an inspector from already validated parts.
    pub const fn new(manifest: Manifest, size_group: SizeGroup, filter: FilterConfig) -> Self {
        Self {
            manifest,
            size_group,
            filter,
        }
    }

    /// Validate `config` and build an inspector from it.
    pub fn from_config(config: &Config) -> Result<Self> {
        validate_config(config)?;
        Ok(Self::new(
            config.manifest.clone(),
            config.size_group.clone(),
            config.thresholds.clone(),
        ))
    }

    /// Required items.
    pub const fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Active thresholds.
    pub const fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Inspect one image's detections.
    ///
    /// Never fails: malformed input is dropped with a warning.
    pub fn inspect(&self, image: ImageSize, raw: Vec<RawDetection>) -> Inspection {
        let admitted = self.admit(raw);

        let plausible = reject_hallucinations(
            admitted,
            image,
            &self.manifest,
            self.filter.max_box_area_ratio,
        );

        let (sized, others): (Vec<Detection>, Vec<Detection>) = plausible
            .into_iter()
            .partition(|d| self.size_group.contains(d.class_label()));

        let split = SizeSubclassifier::new(&self.size_group, &self.filter).classify(sized);
        let selected = select_by_tier(
            others,
            &self.manifest,
            &self.size_group,
            self.filter.high_confidence,
        );

        let mut detections = split.detections;
        detections.extend(selected);

        let report = reconcile(&detections, &self.manifest);

        Inspection {
            report,
            detections,
            size_split: split.method,
        }
    }

    /// Validate raw detections and apply the confidence floor.
    fn admit(&self, raw: Vec<RawDetection>) -> Vec<Detection> {
        raw.into_iter()
            .filter_map(|r| {
                let label = r.class_label.clone();
                match Detection::try_from(r) {
                    Ok(d) if d.confidence() >= self.filter.low_confidence_floor => Some(d),
                    Ok(d) => {
                        debug!(
                            "Ignoring {} below confidence floor: {:.3}",
                            label,
                            d.confidence()
                        );
                        None
                    }
                    Err(e) => {
                        warn!("Dropping malformed {} detection: {}", label, e);
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw(label: &str, confidence: f32, bbox: [f64; 4]) -> RawDetection {
        RawDetection {
            class_label: label.to_string(),
            confidence,
            bbox,
        }
    }

    fn inspector() -> Inspector {
        Inspector::from_config(&Config::default()).unwrap()
    }

    const IMAGE: ImageSize = ImageSize {
        width: 1000,
        height: 1000,
    };

    #[test]
    fn test_malformed_detections_are_dropped() {
        let inspection = inspector().inspect(
            IMAGE,
            vec![
                raw("Gloves", 0.9, [10.0, 10.0, 5.0, 20.0]),
                raw("Scissors", 1.5, [0.0, 0.0, 10.0, 10.0]),
                raw("Notepad", 0.9, [0.0, 0.0, 10.0, 10.0]),
            ],
        );
        assert_eq!(inspection.detections.len(), 1);
        assert_eq!(inspection.report.found_count("Notepad"), 1);
        assert_eq!(inspection.report.found_count("Gloves"), 0);
    }

    #[test]
    fn test_below_floor_is_ignored() {
        let inspection =
            inspector().inspect(IMAGE, vec![raw("Gloves", 0.01, [0.0, 0.0, 10.0, 10.0])]);
        assert_eq!(inspection.report.found_count("Gloves"), 0);
    }

    #[test]
    fn test_hallucinated_box_never_counted() {
        let inspection =
            inspector().inspect(IMAGE, vec![raw("Thermal blanket", 0.99, [0.0, 0.0, 1000.0, 900.0])]);
        assert!(inspection.detections.is_empty());
        assert_eq!(inspection.report.shortfall("Thermal blanket"), 1);
    }

    #[test]
    fn test_full_kit_is_complete() {
        let manifest = Manifest::default();
        let mut detections = Vec::new();
        let mut x = 0.0;
        for entry in &manifest {
            // bandages of each size get clearly separated areas
            let side = if entry.name == "Large bandage" { 60.0 } else { 20.0 };
            for _ in 0..entry.count {
                detections.push(raw(&entry.name, 0.8, [x, 0.0, x + side, side]));
                x += 1.0;
            }
        }

        let inspection = inspector().inspect(IMAGE, detections);
        assert!(inspection.report.is_complete(), "{:?}", inspection.report);
        assert!(matches!(inspection.size_split, SplitMethod::SizeGap { .. }));
    }
}
