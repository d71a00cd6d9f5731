use crate::extractor::models::InfoDict;
use crate::extractor::options::EngineOptions;
use crate::utils::error::EngineError;
use async_trait::async_trait;

/// What the engine should do with a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractAction {
    /// Resolve metadata and fetch the media
    Download,
    /// Resolve metadata only
    MetadataOnly,
}

impl ExtractAction {
    pub fn downloads(self) -> bool {
        matches!(self, ExtractAction::Download)
    }
}

/// The extraction engine behind the facade
///
/// This trait isolates the facade from how extraction actually happens
/// (yt-dlp process, a test double, ...).
#[async_trait]
pub trait Engine: Send + Sync {
    /// Returns a unique identifier for this engine (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Run one extraction with the given options and return the engine's
    /// result mapping as-is.
    async fn extract_info(
        &self,
        url: &str,
        options: &EngineOptions,
        action: ExtractAction,
    ) -> Result<InfoDict, EngineError>;
}
