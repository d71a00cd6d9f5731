//! Output directory handling

use crate::utils::error::WrapperError;
use std::path::Path;
use tracing::debug;

/// Make sure `directory` exists, creating missing parents.
///
/// Succeeds without touching the filesystem when the directory is already there.
/// A regular file at `directory` counts as a failure.
pub fn ensure_directory(directory: impl AsRef<Path>) -> Result<(), WrapperError> {
    let directory = directory.as_ref();
    if directory.is_dir() {
        return Ok(());
    }

    debug!("Creating directory: {:?}", directory);
    std::fs::create_dir_all(directory).map_err(|source| WrapperError::DirectoryCreation {
        directory: directory.to_path_buf(),
        source,
    })
}
