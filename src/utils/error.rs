//! Error handling for ytkit

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by an extraction engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    NotFound,

    #[error("Failed to run yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("{}", failure_message(.status, .stderr))]
    Failed { status: Option<i32>, stderr: String },

    #[error("Failed to parse engine output: {0}")]
    Parse(String),
}

fn failure_message(status: &Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    match (stderr.is_empty(), status) {
        (false, _) => stderr.to_string(),
        (true, Some(code)) => format!("yt-dlp exited with status {}", code),
        (true, None) => "yt-dlp was terminated by a signal".to_string(),
    }
}

/// Which facade operation an engine failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadContext {
    Download,
    VideoInfo,
    Audio,
}

impl fmt::Display for DownloadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Download => write!(f, "during the download"),
            Self::VideoInfo => write!(f, "while retrieving video info"),
            Self::Audio => write!(f, "during the audio download"),
        }
    }
}

/// Main error type for ytkit
#[derive(Debug, Error)]
pub enum WrapperError {
    /// Every engine failure collapses into this kind; `source` keeps the engine error.
    #[error("An error occurred {context}: {source}. URL: {url}")]
    Download {
        context: DownloadContext,
        url: String,
        #[source]
        source: EngineError,
    },

    #[error("The provided URL is invalid: {reason}. URL: {url}")]
    InvalidUrl { url: String, reason: String },

    #[error("Could not create the directory: {}", directory.display())]
    DirectoryCreation {
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction engine unavailable: {0}")]
    Engine(#[from] EngineError),

    #[error("Failed to read settings from {}: {source}", path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings in {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl WrapperError {
    /// URL the failing operation was called with, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Download { url, .. } | Self::InvalidUrl { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Underlying engine failure, for callers that need more than the collapsed kind
    pub fn engine_error(&self) -> Option<&EngineError> {
        match self {
            Self::Download { source, .. } => Some(source),
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}
