//! Reconciliation of surviving detections against the manifest.

use crate::inventory::{Detection, Manifest};
use serde::Serialize;
use std::collections::BTreeMap;

/// A manifest item with fewer detections than required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingItem {
    /// Item name.
    pub item: String,
    /// How many more are needed.
    pub shortfall: usize,
}

/// Completeness verdict for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    found: BTreeMap<String, usize>,
    is_complete: bool,
    missing: Vec<MissingItem>,
}

impl InventoryReport {
    /// Counts per class label.
    pub const fn found(&self) -> &BTreeMap<String, usize> {
        &self.found
    }

    /// Count for one item, zero if never seen.
    pub fn found_count(&self, item: &str) -> usize {
        self.found.get(item).copied().unwrap_or(0)
    }

    /// Whether every manifest item is present in full.
    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Short items in manifest order.
    pub fn missing(&self) -> &[MissingItem] {
        &self.missing
    }

    /// Shortfall for one item, zero if it is not short.
    pub fn shortfall(&self, item: &str) -> usize {
        self.missing
            .iter()
            .find(|m| m.item == item)
            .map_or(0, |m| m.shortfall)
    }
}

/// Count detections by label and compare with the manifest.
pub fn reconcile(detections: &[Detection], manifest: &Manifest) -> InventoryReport {
    let mut found: BTreeMap<String, usize> = BTreeMap::new();
    for d in detections {
        *found.entry(d.class_label().to_string()).or_insert(0) += 1;
    }

    let missing: Vec<MissingItem> = manifest
        .iter()
        .filter_map(|entry| {
            let have = found.get(&entry.name).copied().unwrap_or(0);
            (have < entry.count).then(|| MissingItem {
                item: entry.name.clone(),
                shortfall: entry.count - have,
            })
        })
        .collect();

    InventoryReport {
        found,
        is_complete: missing.is_empty(),
        missing,
    }
}
