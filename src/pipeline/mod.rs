//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{
    collect_input_files, combined_output_path, image_stem, json_output_path, output_dir_for,
};
pub use processor::{ProcessResult, process_file};
