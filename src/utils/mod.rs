//! Utility modules for error handling, configuration and directories

pub mod config;
pub mod error;
pub mod fs;

// Re-export for convenience
pub use config::WrapperSettings;
pub use error::{DownloadContext, EngineError, WrapperError};
pub use fs::ensure_directory;
