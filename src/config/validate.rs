//! Configuration validation.

use crate::config::{Config, FilterConfig};
use crate::constants::confidence;
use crate::error::{Error, Result};
use crate::inventory::{Manifest, SizeGroup};
use std::collections::HashSet;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_thresholds(&config.thresholds)?;
    validate_manifest(&config.manifest)?;
    validate_size_group(&config.size_group, &config.manifest)?;
    Ok(())
}

fn invalid(message: String) -> Error {
    Error::ConfigValidation { message }
}

/// Validate filter thresholds.
fn validate_thresholds(filter: &FilterConfig) -> Result<()> {
    let range = confidence::MIN..=confidence::MAX;

    if !range.contains(&filter.low_confidence_floor) {
        return Err(invalid(format!(
            "low_confidence_floor must be between {} and {}, got {}",
            confidence::MIN,
            confidence::MAX,
            filter.low_confidence_floor
        )));
    }

    if !range.contains(&filter.high_confidence) {
        return Err(invalid(format!(
            "high_confidence must be between {} and {}, got {}",
            confidence::MIN,
            confidence::MAX,
            filter.high_confidence
        )));
    }

    if filter.low_confidence_floor > filter.high_confidence {
        return Err(invalid(format!(
            "low_confidence_floor ({}) must not exceed high_confidence ({})",
            filter.low_confidence_floor, filter.high_confidence
        )));
    }

    if !(filter.max_box_area_ratio > 0.0 && filter.max_box_area_ratio <= 1.0) {
        return Err(invalid(format!(
            "max_box_area_ratio must be in (0, 1], got {}",
            filter.max_box_area_ratio
        )));
    }

    // NaN fails this comparison too
    if !(filter.size_gap_ratio >= 1.0) {
        return Err(invalid(format!(
            "size_gap_ratio must be at least 1.0, got {}",
            filter.size_gap_ratio
        )));
    }

    if filter.max_per_subclass == 0 {
        return Err(invalid("max_per_subclass must be at least 1".to_string()));
    }

    Ok(())
}

/// Validate the required item list.
fn validate_manifest(manifest: &Manifest) -> Result<()> {
    if manifest.is_empty() {
        return Err(invalid("manifest must list at least one item".to_string()));
    }

    let mut seen = HashSet::new();
    for entry in manifest {
        if entry.name.trim().is_empty() {
            return Err(invalid("manifest item names must not be empty".to_string()));
        }
        if entry.count == 0 {
            return Err(invalid(format!(
                "manifest item '{}' must require at least 1",
                entry.name
            )));
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(invalid(format!(
                "manifest item '{}' is listed more than once",
                entry.name
            )));
        }
    }

    Ok(())
}

/// Validate that the size group names two distinct manifest items.
fn validate_size_group(group: &SizeGroup, manifest: &Manifest) -> Result<()> {
    if group.large == group.small {
        return Err(invalid(format!(
            "size_group large and small labels must differ, both are '{}'",
            group.large
        )));
    }

    for label in [&group.large, &group.small] {
        if !manifest.contains(label) {
            return Err(invalid(format!(
                "size_group label '{label}' is not a manifest item"
            )));
        }
    }

    Ok(())
}
