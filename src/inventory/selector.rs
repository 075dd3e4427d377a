//! Two-tier confidence selection for ordinary classes.

use crate::inventory::detection::by_confidence_desc;
use crate::inventory::{Detection, Manifest, SizeGroup};
use std::collections::HashMap;

/// Select up to the required count per class, trusted detections first.
///
/// Classes in `size_group` are skipped; they are handled by the
/// subclassifier. Output follows manifest order, highest confidence first
/// within each class.
pub fn select_by_tier(
    detections: Vec<Detection>,
    manifest: &Manifest,
    size_group: &SizeGroup,
    high_confidence: f32,
) -> Vec<Detection> {
    let mut grouped: HashMap<String, Vec<Detection>> = HashMap::new();
    for d in detections {
        grouped
            .entry(d.class_label().to_string())
            .or_default()
            .push(d);
    }

    let mut selected = Vec::new();
    for entry in manifest {
        if size_group.contains(&entry.name) {
            continue;
        }
        if let Some(candidates) = grouped.remove(&entry.name) {
            selected.extend(select_for_class(candidates, entry.count, high_confidence));
        }
    }

    selected
}

/// Pick at most `required` detections of one class.
///
/// Tier 1 takes detections with `confidence >= high_confidence`; tier 2
/// fills the remaining slots from the rest, best first.
pub fn select_for_class(
    mut candidates: Vec<Detection>,
    required: usize,
    high_confidence: f32,
) -> Vec<Detection> {
    candidates.sort_by(by_confidence_desc);

    let (high, low): (Vec<Detection>, Vec<Detection>) = candidates
        .into_iter()
        .partition(|d| d.confidence() >= high_confidence);

    let mut selected: Vec<Detection> = high.into_iter().take(required).collect();
    let remaining = required - selected.len();
    selected.extend(low.into_iter().take(remaining));
    selected
}
