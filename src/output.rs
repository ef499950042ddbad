use crate::error::{GenerateError, Result};
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Timestamp prefix of generated file names, minute resolution
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// File name for a document generated at `timestamp`
pub fn output_file_name(timestamp: NaiveDateTime, suffix: &str) -> String {
    format!("{}_{}.html", timestamp.format(TIMESTAMP_FORMAT), suffix)
}

/// Writes the generated document into `dir`, stamped with the current local time
pub fn save_document<P: AsRef<Path>>(dir: P, suffix: &str, text: &str) -> Result<PathBuf> {
    save_document_at(dir, suffix, text, Local::now().naive_local())
}

/// Writes the generated document verbatim, creating `dir` when absent
///
/// A file from a run in the same minute is overwritten.
pub fn save_document_at<P: AsRef<Path>>(
    dir: P,
    suffix: &str,
    text: &str,
    timestamp: NaiveDateTime,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|source| GenerateError::Output {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(output_file_name(timestamp, suffix));
    if path.exists() {
        ::log::warn!("Overwriting existing output {}", path.display());
    }

    std::fs::write(&path, text).map_err(|source| GenerateError::Output {
        path: path.clone(),
        source,
    })?;

    ::log::info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(path)
}
