//! Environment/runtime helpers
//!
//! Startup sanity check for the data file. Nothing is created here; the store
//! creates the directory and seeds the file when it opens.

use std::path::Path;

use tracing::{info, warn};

/// What startup found at the configured data file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFileStatus {
    Present,
    /// The directory exists but the file does not.
    Missing,
    /// Neither the file nor its directory exists.
    DirectoryMissing,
}

/// Inspect `data_file` and log what the store will find when it opens.
pub async fn check_data_file(data_file: &Path) -> DataFileStatus {
    if tokio::fs::metadata(data_file).await.is_ok() {
        info!(data_file = %data_file.display(), "using existing data file");
        return DataFileStatus::Present;
    }

    let dir_exists = match data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => tokio::fs::metadata(dir).await.map(|m| m.is_dir()).unwrap_or(false),
        None => true,
    };
    if dir_exists {
        warn!(data_file = %data_file.display(), "data file not found; an empty collection will be created");
        DataFileStatus::Missing
    } else {
        warn!(data_file = %data_file.display(), "data directory not found; it will be created with an empty collection");
        DataFileStatus::DirectoryMissing
    }
}
