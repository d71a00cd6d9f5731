//! ytkit library
//!
//! A thin, typed layer over yt-dlp: build the engine configuration, make sure
//! the output directory exists, run one extraction, and map failures into
//! [`WrapperError`].

pub mod downloader;
pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{YtdlWrapper, DEFAULT_DOWNLOAD_DIR};
pub use extractor::{
    build_audio_options, build_default_options, Engine, EngineError, EngineOptions,
    ExtractAction, InfoDict, Postprocessor, VideoSummary, YtDlpEngine,
};
pub use utils::{ensure_directory, DownloadContext, WrapperError, WrapperSettings};
