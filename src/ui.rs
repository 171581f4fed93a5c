use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};

/// Creates a byte progress bar for one download.
///
/// With a known `total` the bar shows transferred bytes, rate and ETA;
/// without one it falls back to a spinner with the running byte count.
///
/// # Example
///
/// ```no_run
/// use vms_openkits::ui;
///
/// # fn main() -> Result<(), vms_openkits::errors::AppError> {
/// let pb = ui::create_download_bar(Some(1024), "zlib-1_3-x86.zip")?;
/// pb.inc(512);
/// pb.finish_with_message("Done");
/// # Ok(())
/// # }
/// ```
pub fn create_download_bar(total: Option<u64>, name: &str) -> AppResult<ProgressBar> {
    let (pb, template) = match total {
        Some(len) => (
            ProgressBar::new(len),
            "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        ),
        None => (
            ProgressBar::new_spinner(),
            "{msg}\n{spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec})",
        ),
    };
    pb.set_style(
        ProgressStyle::with_template(template)
            .map_err(|e| AppError::IoError(format!("Failed to create progress bar template: {e}")))?
            .progress_chars("#>-"),
    );
    pb.set_message(name.to_string());
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_with_length() {
        let pb = create_download_bar(Some(100), "kit.zip").unwrap();
        assert_eq!(pb.length(), Some(100));
        pb.finish_and_clear();
    }

    #[test]
    fn test_spinner_without_length() {
        let pb = create_download_bar(None, "kit.zip").unwrap();
        assert_eq!(pb.length(), None);
        pb.finish_and_clear();
    }
}
