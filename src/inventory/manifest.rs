//! Required item manifest and the size-ambiguous class group.

use crate::constants::size_group;
use serde::{Deserialize, Serialize};

/// One required item and how many of it a complete kit holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Item name, identical to the detector class label.
    pub name: String,
    /// Required count (> 0).
    pub count: usize,
}

impl ManifestEntry {
    /// Create a manifest entry.
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Ordered list of required items.
///
/// Iteration order is the declaration order and drives the order of the
/// missing-item list in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Create a manifest from entries in report order.
    pub const fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }

    /// Whether `name` is a required item.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Required count for `name`, if it is in the manifest.
    pub fn required(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.count)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Manifest {
    /// The standard automobile first-aid kit.
    fn default() -> Self {
        Self::new(vec![
            ManifestEntry::new(size_group::LARGE, 3),
            ManifestEntry::new(size_group::SMALL, 3),
            ManifestEntry::new("wipes", 2),
            ManifestEntry::new("Adhesive plaster", 1),
            ManifestEntry::new("Artificial respiration device", 2),
            ManifestEntry::new("Instruction leaflet", 1),
            ManifestEntry::new("pencil", 1),
            ManifestEntry::new("Thermal blanket", 1),
            ManifestEntry::new("Medical mask", 1),
            ManifestEntry::new("Gloves", 1),
            ManifestEntry::new("Scissors", 1),
            ManifestEntry::new("Notepad", 1),
            ManifestEntry::new("Tourniquet", 1),
        ])
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Which of the two physical sizes a size-ambiguous detection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    /// The physically larger item.
    Large,
    /// The physically smaller item.
    Small,
}

/// A detector class that covers two physically distinct item sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeGroup {
    /// Label of the larger item.
    pub large: String,
    /// Label of the smaller item.
    pub small: String,
}

impl SizeGroup {
    /// Whether `label` is one of the two sub-class labels.
    pub fn contains(&self, label: &str) -> bool {
        label == self.large || label == self.small
    }

    /// Sub-class of `label`, if it belongs to this group.
    pub fn size_class(&self, label: &str) -> Option<SizeClass> {
        if label == self.large {
            Some(SizeClass::Large)
        } else if label == self.small {
            Some(SizeClass::Small)
        } else {
            None
        }
    }

    /// Label for a sub-class.
    pub fn label(&self, class: SizeClass) -> &str {
        match class {
            SizeClass::Large => &self.large,
            SizeClass::Small => &self.small,
        }
    }
}

impl Default for SizeGroup {
    fn default() -> Self {
        Self {
            large: size_group::LARGE.to_string(),
            small: size_group::SMALL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_has_thirteen_items() {
        let manifest = Manifest::default();
        assert_eq!(manifest.len(), 13);
        assert_eq!(manifest.required("Large bandage"), Some(3));
        assert_eq!(manifest.required("wipes"), Some(2));
        assert_eq!(manifest.required("Stethoscope"), None);
    }

    #[test]
    fn test_manifest_preserves_order() {
        let manifest = Manifest::new(vec![
            ManifestEntry::new("Tourniquet", 1),
            ManifestEntry::new("Gloves", 2),
        ]);
        let names: Vec<&str> = manifest.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Tourniquet", "Gloves"]);
    }

    #[test]
    fn test_size_group_membership() {
        let group = SizeGroup::default();
        assert!(group.contains("Large bandage"));
        assert!(group.contains("small bandage"));
        assert!(!group.contains("Gloves"));
        assert_eq!(group.size_class("small bandage"), Some(SizeClass::Small));
        assert_eq!(group.label(SizeClass::Large), "Large bandage");
    }
}
