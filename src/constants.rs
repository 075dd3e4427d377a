//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "kitcheck";

/// Default filter thresholds.
pub mod thresholds {
    /// Floor below which the detector never reports a box.
    ///
    /// Detections between this floor and [`HIGH_CONFIDENCE`] form the
    /// low-confidence tier used only to fill remaining slots.
    pub const LOW_CONFIDENCE_FLOOR: f32 = 0.05;

    /// Confidence at or above which a detection is trusted outright.
    pub const HIGH_CONFIDENCE: f32 = 0.25;

    /// Boxes covering more than this fraction of the frame are treated as
    /// hallucinations.
    pub const MAX_BOX_AREA_RATIO: f64 = 0.85;

    /// Minimum area ratio between consecutive items that confirms a
    /// large/small boundary.
    pub const SIZE_GAP_RATIO: f64 = 2.0;

    /// Hard cap on items kept per size sub-class.
    pub const MAX_PER_SUBCLASS: usize = 3;

    /// Denominator substituted for a zero area during gap detection.
    pub const AREA_EPSILON: f64 = 1e-6;
}

/// Default size-ambiguous class labels.
pub mod size_group {
    /// Label for the larger physical item.
    pub const LARGE: &str = "Large bandage";
    /// Label for the smaller physical item.
    pub const SMALL: &str = "small bandage";
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
}

/// Suffix of detector output files consumed by the batch driver.
pub const DETECTIONS_SUFFIX: &str = ".detections.json";

/// Output file extensions by format.
pub mod output_extensions {
    /// Per-image JSON inventory extension.
    pub const JSON: &str = ".inventory.json";
}

/// Combined output file names.
pub mod combined_filenames {
    /// Combined text report.
    pub const TEXT: &str = "report.txt";
    /// Combined CSV summary.
    pub const CSV: &str = "inventory_summary.csv";
}

/// Width of the separator line between text report entries.
pub const REPORT_SEPARATOR_WIDTH: usize = 40;
