use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// `<dir>/<name>-<millis>.pdf`, with `name` reduced to a filesystem-safe slug.
pub fn output_path(dir: &Path, name: &str, timestamp: DateTime<Utc>) -> PathBuf {
    let stem = match slug::slugify(name) {
        s if s.is_empty() => crate::config::DEFAULT_DOCUMENT_NAME.to_string(),
        s => s,
    };
    dir.join(format!("{}-{}.pdf", stem, timestamp.timestamp_millis()))
}

/// Writes `bytes` to a fresh timestamped file under `dir`, creating the
/// directory tree first.
pub fn write_document(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, PipelineError> {
    if !dir.is_dir() {
        info!("Creating output directory '{}'", dir.display());
        fs::create_dir_all(dir)?;
    }
    let path = output_path(dir, name, Utc::now());
    fs::write(&path, bytes)?;
    info!("Wrote {} bytes to '{}'", bytes.len(), path.display());
    Ok(path)
}
