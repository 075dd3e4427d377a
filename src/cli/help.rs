//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::config_file_path;

/// Print help message based on whether a config file exists.
pub fn print_smart_help() {
    let has_config = config_file_path().is_ok_and(|p| p.exists());
    println!("{}", smart_help(has_config));
}

/// Help text for first-time or configured users.
pub fn smart_help(has_config: bool) -> String {
    let mut lines = vec![
        "Usage: kitcheck [OPTIONS] <INPUTS>...",
        "",
        "Inputs are <image>.detections.json files written by the detector,",
        "or directories containing them.",
        "",
        "Example: kitcheck photos/ --format text,csv --output-dir results/",
        "",
    ];

    if !has_config {
        lines.extend([
            "No configuration file found; built-in thresholds and kit contents are used.",
            "Run 'kitcheck config init' to write an editable copy.",
            "",
        ]);
    }

    lines.push("Run 'kitcheck -h' for all options or 'kitcheck manifest' to see required items.");
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_time_help_mentions_config_init() {
        let help = smart_help(false);
        assert!(help.contains("kitcheck config init"));
        assert!(help.starts_with("Usage: kitcheck"));
    }

    #[test]
    fn test_configured_help_is_brief() {
        let help = smart_help(true);
        assert!(!help.contains("config init"));
        assert!(help.contains("kitcheck manifest"));
    }
}
