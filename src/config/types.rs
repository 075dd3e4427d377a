//! Configuration type definitions.

use crate::constants::thresholds;
use crate::inventory::{Manifest, SizeGroup};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detection filter thresholds.
    pub thresholds: FilterConfig,

    /// The detector class split into two physical sizes.
    pub size_group: SizeGroup,

    /// Output settings.
    pub output: OutputConfig,

    /// Required kit contents, in report order.
    pub manifest: Manifest,
}

/// Thresholds applied to raw detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Detections below this confidence are ignored entirely.
    pub low_confidence_floor: f32,

    /// Detections at or above this confidence form the trusted tier.
    #[serde(alias = "high_confidence_threshold")]
    pub high_confidence: f32,

    /// Largest plausible box area as a fraction of the image area.
    pub max_box_area_ratio: f64,

    /// Minimum consecutive area ratio that confirms a size boundary.
    pub size_gap_ratio: f64,

    /// Maximum items kept per size sub-class.
    pub max_per_subclass: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            low_confidence_floor: thresholds::LOW_CONFIDENCE_FLOOR,
            high_confidence: thresholds::HIGH_CONFIDENCE,
            max_box_area_ratio: thresholds::MAX_BOX_AREA_RATIO,
            size_gap_ratio: thresholds::SIZE_GAP_RATIO,
            max_per_subclass: thresholds::MAX_PER_SUBCLASS,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report formats to write.
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Text],
        }
    }
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Combined plain-text report.
    Text,
    /// Per-image JSON inventory.
    Json,
    /// Combined CSV summary.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
