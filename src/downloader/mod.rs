//! Download facade module

pub mod wrapper;

// Re-export for convenience
pub use wrapper::{validate_url, YtdlWrapper, DEFAULT_DOWNLOAD_DIR};
