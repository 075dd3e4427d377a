//! Kitcheck - first-aid kit completeness checker.
//!
//! This crate turns object detector output for photos of a standardized
//! medical kit into a per-image inventory and a list of missing items.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod inventory;
pub mod output;
pub mod pipeline;
pub mod source;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, InspectArgs};
use config::{Config, OutputFormat, load_config, resolve_config_path, save_config_to};
use inventory::Inspector;
use output::{CsvSummaryWriter, ReportWriter, TextReportWriter};
use pipeline::{collect_input_files, combined_output_path, output_dir_for, process_file};
use source::JsonFileSource;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for kitcheck CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.inspect.verbose, cli.inspect.quiet);

    let config_path = cli.inspect.config.as_deref();

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, config_path);
    }

    // Show help if no inputs provided
    if cli.inputs.is_empty() {
        cli::help::print_smart_help();
        return Ok(());
    }

    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, &cli.inspect);

    inspect_files(&cli.inputs, &cli.inspect, &config)
}

/// Apply command-line threshold and format overrides on top of the config file.
fn apply_overrides(config: &mut Config, args: &InspectArgs) {
    let thresholds = &mut config.thresholds;

    if let Some(value) = args.low_confidence {
        thresholds.low_confidence_floor = value;
    }
    if let Some(value) = args.high_confidence {
        thresholds.high_confidence = value;
    }
    if let Some(value) = args.max_box_area_ratio {
        thresholds.max_box_area_ratio = value;
    }
    if let Some(value) = args.size_gap_ratio {
        thresholds.size_gap_ratio = value;
    }
    if let Some(value) = args.max_per_subclass {
        thresholds.max_per_subclass = usize::from(value);
    }
    if let Some(formats) = &args.format {
        config.output.formats.clone_from(formats);
    }
}

/// Inspect input files with the given options.
fn inspect_files(inputs: &[PathBuf], args: &InspectArgs, config: &Config) -> Result<()> {
    use crate::output::progress;
    use std::time::Instant;

    let total_start = Instant::now();

    let inspector = Inspector::from_config(config)?;

    // Collect all input files
    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoDetectionFiles);
    }

    info!("Found {} detection file(s) to inspect", files.len());

    let formats = dedup_formats(&config.output.formats);
    let write_json = formats.contains(&OutputFormat::Json);
    let output_dir = args.output_dir.as_deref();

    let combined_dir = output_dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let mut writers = create_combined_writers(&combined_dir, &formats)?;
    for writer in &mut writers {
        writer.write_header()?;
    }

    let file_progress = progress::create_image_progress(files.len(), !args.quiet);

    let mut complete = 0;
    let mut incomplete = 0;
    let mut errors = 0;

    for file in &files {
        let file_output_dir = output_dir_for(file, output_dir);
        if write_json {
            ensure_dir(&file_output_dir)?;
        }

        match process_file(
            file,
            &JsonFileSource,
            &inspector,
            &file_output_dir,
            write_json,
        ) {
            Ok(result) => {
                let verdict = if result.inspection.report.is_complete() {
                    complete += 1;
                    "COMPLETE"
                } else {
                    incomplete += 1;
                    "INCOMPLETE"
                };

                for writer in &mut writers {
                    writer.write_entry(&result.image_name, &result.inspection)?;
                }
                progress::advance(file_progress.as_ref(), verdict);
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if args.fail_fast {
                    progress::finish_progress(file_progress, "Failed");
                    for writer in &mut writers {
                        writer.finalize()?;
                    }
                    return Err(e);
                }
                progress::advance(file_progress.as_ref(), "ERROR");
            }
        }
    }

    progress::finish_progress(file_progress, "Done");

    for writer in &mut writers {
        writer.finalize()?;
    }

    // Summary
    let total_duration = total_start.elapsed().as_secs_f64();
    info!(
        "Complete: {}, Incomplete: {}, errors: {} in {:.2}s",
        complete, incomplete, errors, total_duration
    );

    if errors > 0 {
        warn!("{} file(s) had errors", errors);
    }

    Ok(())
}

fn dedup_formats(formats: &[OutputFormat]) -> Vec<OutputFormat> {
    let mut unique = Vec::with_capacity(formats.len());
    for format in formats {
        if !unique.contains(format) {
            unique.push(*format);
        }
    }
    unique
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| Error::OutputDirCreateFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Open the writers for formats that combine every image into one file.
fn create_combined_writers(
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<Vec<Box<dyn ReportWriter>>> {
    let mut writers: Vec<Box<dyn ReportWriter>> = Vec::new();

    for &format in formats {
        let Some(path) = combined_output_path(output_dir, format) else {
            continue;
        };
        ensure_dir(output_dir)?;
        info!("Writing {} report: {}", format, path.display());

        let writer: Box<dyn ReportWriter> = match format {
            OutputFormat::Text => Box::new(TextReportWriter::new(&path)?),
            OutputFormat::Csv => Box::new(CsvSummaryWriter::new(&path)?),
            OutputFormat::Json => continue,
        };
        writers.push(writer);
    }

    Ok(writers)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // stdout is reserved for command output
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, config_path: Option<&Path>) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config_path),
        Command::Manifest => {
            let config = load_config(config_path)?;
            print_manifest(&config);
            Ok(())
        }
    }
}

fn print_manifest(config: &Config) {
    println!("Required kit contents:");
    for entry in &config.manifest {
        let marker = if config.size_group.contains(&entry.name) {
            " [size-based]"
        } else {
            ""
        };
        println!("  {} x{}{}", entry.name, entry.count, marker);
    }
}

fn handle_config_command(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = resolve_config_path(config_path)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_config_to(&config, config_path)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nEdit [thresholds] or [[manifest]] entries to match your kit.");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{rendered}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = resolve_config_path(config_path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let args = Cli::try_parse_from([
            "kitcheck",
            "a.detections.json",
            "--high-confidence",
            "0.4",
            "--max-per-subclass",
            "2",
            "--format",
            "csv",
        ])
        .unwrap()
        .inspect;

        let mut config = Config::default();
        apply_overrides(&mut config, &args);

        assert_eq!(config.thresholds.high_confidence, 0.4);
        assert_eq!(config.thresholds.max_per_subclass, 2);
        assert_eq!(config.output.formats, vec![OutputFormat::Csv]);
        assert_eq!(
            config.thresholds.low_confidence_floor,
            constants::thresholds::LOW_CONFIDENCE_FLOOR
        );
    }

    #[test]
    fn test_dedup_formats_keeps_order() {
        let formats = [OutputFormat::Csv, OutputFormat::Text, OutputFormat::Csv];
        assert_eq!(
            dedup_formats(&formats),
            vec![OutputFormat::Csv, OutputFormat::Text]
        );
    }

    #[test]
    fn test_create_combined_writers_skips_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let writers = create_combined_writers(
            dir.path(),
            &[OutputFormat::Json, OutputFormat::Text, OutputFormat::Csv],
        )
        .unwrap();
        assert_eq!(writers.len(), 2);
        assert!(dir.path().join("report.txt").exists());
        assert!(dir.path().join("inventory_summary.csv").exists());
    }
}
