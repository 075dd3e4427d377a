//! Progress bar for batch inspection.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar over `total_images`, or `None` when disabled.
///
/// Single-image runs get no bar.
pub fn create_image_progress(total_images: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_images < 2 {
        return None;
    }

    let pb = ProgressBar::new(total_images as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.green/white} {pos}/{len} images {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    Some(pb)
}

/// Advance the bar and show the last verdict.
pub fn advance(pb: Option<&ProgressBar>, verdict: &str) {
    if let Some(pb) = pb {
        pb.set_message(verdict.to_string());
        pb.inc(1);
    }
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_or_single_has_no_bar() {
        assert!(create_image_progress(10, false).is_none());
        assert!(create_image_progress(1, true).is_none());
    }

    #[test]
    fn test_advance_counts() {
        let pb = create_image_progress(3, true);
        advance(pb.as_ref(), "OK");
        advance(pb.as_ref(), "INCOMPLETE");
        assert_eq!(pb.as_ref().map(ProgressBar::position), Some(2));
        finish_progress(pb, "done");
    }
}
