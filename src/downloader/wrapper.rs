//! Download facade
//!
//! Every operation builds a fresh [`EngineOptions`], makes one call into the
//! engine, and hands back the engine's result mapping untouched. Engine
//! failures are re-wrapped as [`WrapperError::Download`].

use crate::extractor::models::InfoDict;
use crate::extractor::options::{
    build_audio_options, build_default_options, EngineOptions, DEFAULT_FORMAT,
};
use crate::extractor::traits::{Engine, ExtractAction};
use crate::extractor::ytdlp::YtDlpEngine;
use crate::utils::config::WrapperSettings;
use crate::utils::error::{DownloadContext, WrapperError};
use crate::utils::fs::ensure_directory;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::{ParseError, Url};

/// Directory used when none is configured
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

/// Convenience layer over an extraction engine
pub struct YtdlWrapper<E: Engine = YtDlpEngine> {
    engine: E,
    default_download_dir: PathBuf,
}

impl YtdlWrapper<YtDlpEngine> {
    /// Locate yt-dlp and create `default_download_dir`
    pub fn with_ytdlp(default_download_dir: impl Into<PathBuf>) -> Result<Self, WrapperError> {
        Self::new(YtDlpEngine::new()?, default_download_dir)
    }

    pub fn from_settings(settings: &WrapperSettings) -> Result<Self, WrapperError> {
        let engine = match &settings.ytdlp_path {
            Some(path) => YtDlpEngine::with_path(path)?,
            None => YtDlpEngine::new()?,
        };
        Self::new(engine, settings.download_dir.clone())
    }
}

impl<E: Engine> YtdlWrapper<E> {
    /// Wrap `engine`. The default directory is created right away.
    pub fn new(engine: E, default_download_dir: impl Into<PathBuf>) -> Result<Self, WrapperError> {
        let default_download_dir = default_download_dir.into();
        ensure_directory(&default_download_dir)?;

        info!(
            "Wrapper ready (engine: {}, directory: {:?})",
            engine.id(),
            default_download_dir
        );
        Ok(Self {
            engine,
            default_download_dir,
        })
    }

    pub fn default_download_dir(&self) -> &Path {
        &self.default_download_dir
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Download a video, or a whole playlist when `is_playlist` is set.
    ///
    /// `download_dir` overrides the default directory for this call only.
    pub async fn download(
        &self,
        url: &str,
        is_playlist: bool,
        download_dir: Option<&Path>,
    ) -> Result<InfoDict, WrapperError> {
        validate_url(url)?;
        let directory = self.resolve_dir(download_dir);
        let options = build_default_options(DEFAULT_FORMAT, is_playlist, directory)?;
        self.run(url, &options, ExtractAction::Download, DownloadContext::Download)
            .await
    }

    /// Fetch metadata for a single video without downloading it
    pub async fn get_video_info(&self, url: &str) -> Result<InfoDict, WrapperError> {
        validate_url(url)?;
        let options = build_default_options(DEFAULT_FORMAT, false, &self.default_download_dir)?;
        self.run(url, &options, ExtractAction::MetadataOnly, DownloadContext::VideoInfo)
            .await
    }

    /// Download the best audio stream and convert it to mp3
    pub async fn download_audio(
        &self,
        url: &str,
        download_dir: Option<&Path>,
    ) -> Result<InfoDict, WrapperError> {
        validate_url(url)?;
        let options = build_audio_options(self.resolve_dir(download_dir))?;
        self.run(url, &options, ExtractAction::Download, DownloadContext::Audio)
            .await
    }

    pub async fn download_video_simple(
        &self,
        url: &str,
        download_dir: Option<&Path>,
    ) -> Result<InfoDict, WrapperError> {
        self.download(url, false, download_dir).await
    }

    pub async fn download_audio_simple(
        &self,
        url: &str,
        download_dir: Option<&Path>,
    ) -> Result<InfoDict, WrapperError> {
        self.download_audio(url, download_dir).await
    }

    pub async fn download_playlist(
        &self,
        url: &str,
        download_dir: Option<&Path>,
    ) -> Result<InfoDict, WrapperError> {
        self.download(url, true, download_dir).await
    }

    fn resolve_dir<'a>(&'a self, download_dir: Option<&'a Path>) -> &'a Path {
        download_dir.unwrap_or(&self.default_download_dir)
    }

    async fn run(
        &self,
        url: &str,
        options: &EngineOptions,
        action: ExtractAction,
        context: DownloadContext,
    ) -> Result<InfoDict, WrapperError> {
        debug!("{} {:?} -> {:?}", self.engine.id(), url, options.output_template);

        match self.engine.extract_info(url, options, action).await {
            Ok(info) => Ok(info),
            Err(source) => {
                warn!("Engine call failed {}: {}", context, source);
                Err(WrapperError::Download {
                    context,
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}

/// Reject URLs that could never reach the engine.
///
/// Any scheme is allowed so engine pseudo-URLs such as `ytsearch:` still pass.
/// Scheme-less input (`youtube.com/watch?v=...`, bare video ids) is left to
/// the engine, which resolves it itself.
pub fn validate_url(url: &str) -> Result<(), WrapperError> {
    let invalid = |reason: String| WrapperError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty URL".to_string()));
    }
    if trimmed.len() != url.len() {
        return Err(invalid("surrounding whitespace".to_string()));
    }

    match Url::parse(url) {
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => Ok(()),
        Err(e) => Err(invalid(e.to_string())),
    }
}
