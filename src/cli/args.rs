//! CLI argument definitions.

use crate::cli::validators::{parse_area_ratio, parse_confidence, parse_gap_ratio};
use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Check first-aid kit photos for completeness from object detector output.
#[derive(Debug, Parser)]
#[command(name = "kitcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Detection files or directories to inspect.
    pub inputs: Vec<PathBuf>,

    /// Common options for inspection.
    #[command(flatten)]
    pub inspect: InspectArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the required kit contents.
    Manifest,
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the inspect command.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Configuration file (default: platform config directory).
    #[arg(long, env = "KITCHECK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output formats (comma-separated: text,json,csv).
    #[arg(short, long, value_delimiter = ',', env = "KITCHECK_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Output directory (default: same as input).
    #[arg(short, long, env = "KITCHECK_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Detections below this confidence are ignored (0.0-1.0).
    #[arg(long, value_parser = parse_confidence, env = "KITCHECK_LOW_CONFIDENCE")]
    pub low_confidence: Option<f32>,

    /// Confidence at which a detection is trusted (0.0-1.0).
    #[arg(long, value_parser = parse_confidence, env = "KITCHECK_HIGH_CONFIDENCE")]
    pub high_confidence: Option<f32>,

    /// Boxes covering more than this fraction of the frame are rejected.
    #[arg(long, value_parser = parse_area_ratio, env = "KITCHECK_MAX_BOX_AREA_RATIO")]
    pub max_box_area_ratio: Option<f64>,

    /// Area ratio between neighbours that separates large from small.
    #[arg(long, value_parser = parse_gap_ratio, env = "KITCHECK_SIZE_GAP_RATIO")]
    pub size_gap_ratio: Option<f64>,

    /// Maximum detections kept per size subclass.
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..), env = "KITCHECK_MAX_PER_SUBCLASS")]
    pub max_per_subclass: Option<u16>,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["kitcheck", "kit01.detections.json"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.inputs.len(), 1);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "kitcheck",
            "photos/",
            "--high-confidence",
            "0.4",
            "--max-per-subclass",
            "2",
            "-f",
            "text,json",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.inspect.high_confidence, Some(0.4));
        assert_eq!(cli.inspect.max_per_subclass, Some(2));
        assert_eq!(
            cli.inspect.format,
            Some(vec![OutputFormat::Text, OutputFormat::Json])
        );
        assert!(cli.inspect.quiet);
    }

    #[test]
    fn test_cli_rejects_out_of_range_values() {
        assert!(Cli::try_parse_from(["kitcheck", "a.json", "--high-confidence", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["kitcheck", "a.json", "--max-per-subclass", "0"]).is_err());
        assert!(Cli::try_parse_from(["kitcheck", "a.json", "--size-gap-ratio", "0.5"]).is_err());
        assert!(Cli::try_parse_from(["kitcheck", "a.json", "-f", "pdf"]).is_err());
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["kitcheck", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_cli_parse_manifest_subcommand() {
        let cli = Cli::try_parse_from(["kitcheck", "manifest"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Manifest)));
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["kitcheck", "-vv", "a.json"]).unwrap();
        assert_eq!(cli.inspect.verbose, 2);
    }
}
