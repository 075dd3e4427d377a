//! Input discovery and output path resolution.

use crate::config::OutputFormat;
use crate::constants::{DETECTIONS_SUFFIX, combined_filenames, output_extensions};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Determine the directory for per-image outputs.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Image stem of a detection file: `kit01.detections.json` -> `kit01`.
pub fn image_stem(input: &Path) -> String {
    let name = input.file_name().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );

    strip_suffix_ignore_case(&name, DETECTIONS_SUFFIX)
        .or_else(|| strip_suffix_ignore_case(&name, ".json"))
        .unwrap_or(&name)
        .to_string()
}

/// Per-image JSON inventory path.
pub fn json_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}{}", image_stem(input), output_extensions::JSON))
}

/// Combined output path for formats written once per batch.
///
/// Returns `None` for per-image formats.
pub fn combined_output_path(output_dir: &Path, format: OutputFormat) -> Option<PathBuf> {
    match format {
        OutputFormat::Text => Some(output_dir.join(combined_filenames::TEXT)),
        OutputFormat::Csv => Some(output_dir.join(combined_filenames::CSV)),
        OutputFormat::Json => None,
    }
}

/// Collect detection files from paths (files and directories), sorted.
///
/// Files named explicitly are accepted with any `.json` extension;
/// directories are searched recursively for `*.detections.json`.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_json_file(path) {
                files.push(path.clone());
            } else {
                warn!("Skipping non-JSON file: {}", path.display());
            }
        } else if path.is_dir() {
            collect_detection_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn collect_detection_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_detection_files_recursive(&path, files)?;
        } else if is_detection_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_detection_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .is_some_and(|n| strip_suffix_ignore_case(&n, DETECTIONS_SUFFIX).is_some())
}

fn is_json_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new("json")))
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let (head, tail) = (name.get(..split)?, name.get(split..)?);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
