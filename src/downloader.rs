//! Kit downloads.
//!
//! Kits are fetched one after another into the configured download
//! directory. A failure stops the batch and is returned to the caller.

use crate::errors::{AppError, AppResult};
use crate::fetcher::PortsClient;
use crate::models::{Kit, KitList};
use crate::ui;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Downloads the kits at `indices` (zero-based positions in `kits`).
///
/// Kits are processed in list order regardless of the order of `indices`,
/// and a `Downloading <name>` line is written to `output` before each one.
/// Each file is streamed to `<name>.part` and renamed to `<name>` once
/// complete, replacing any earlier download of the same name.
///
/// # Returns
///
/// The paths of the files written.
///
/// # Errors
///
/// Returns an error if the download directory cannot be created, a request
/// fails or returns a non-success status, or a file cannot be written. Kits
/// after the failing one are not attempted.
pub async fn download_kits<W: Write>(
    client: &PortsClient,
    kits: &KitList,
    indices: &[usize],
    output: &mut W,
) -> AppResult<Vec<PathBuf>> {
    let download_dir = &client.config().download_dir;
    fs::create_dir_all(download_dir)
        .await
        .map_err(|e| AppError::IoError(format!("Failed to create directory: {e}")))?;

    let selected = kits.select(indices);
    let mut written = Vec::with_capacity(selected.len());
    for kit in selected {
        writeln!(output, "Downloading {}", kit.name)?;
        output.flush()?;
        let file_path = download_single_kit(client.http(), kit, download_dir).await?;
        written.push(file_path);
    }

    info!(downloaded = written.len(), "Download completed");
    Ok(written)
}

/// Downloads one kit into `download_dir`.
async fn download_single_kit(
    client: &reqwest::Client,
    kit: &Kit,
    download_dir: &Path,
) -> AppResult<PathBuf> {
    let file_path = download_dir.join(&kit.name);
    let tmp_path = download_dir.join(format!("{}.part", kit.name));

    let response = client
        .get(&kit.url)
        .send()
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to download {}: {e}", kit.name)))?;

    let status = response.status();
    let mut response = response.error_for_status().map_err(|e| {
        AppError::NetworkError(format!(
            "HTTP {}: Failed to download {}: {e}",
            status.as_u16(),
            kit.name
        ))
    })?;

    let pb = ui::create_download_bar(response.content_length(), &kit.name)?;

    let mut file = File::create(&tmp_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create temp file {}: {e}",
            tmp_path.display()
        ))
    })?;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to write to temp file {}: {e}",
                tmp_path.display()
            ))
        })?;
        pb.inc(chunk.len() as u64);
    }
    file.flush().await?;
    drop(file);

    fs::rename(&tmp_path, &file_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to rename temp file {} to {}: {e}",
            tmp_path.display(),
            file_path.display()
        ))
    })?;

    pb.finish_with_message(format!("Downloaded {}", kit.name));
    debug!(file_path = %file_path.display(), bytes = pb.position(), "Kit saved");
    Ok(file_path)
}
