pub mod models;
pub mod options;
pub mod traits;
pub mod ytdlp;

pub use crate::utils::error::EngineError;
pub use models::{InfoDict, VideoSummary};
pub use options::{build_audio_options, build_default_options, EngineOptions, Postprocessor};
pub use traits::{Engine, ExtractAction};
pub use ytdlp::YtDlpEngine;
