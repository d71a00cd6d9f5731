//! Engine configuration
//!
//! [`EngineOptions`] is the per-call mapping handed to the extraction engine.
//! It serializes with yt-dlp's own option names and renders to yt-dlp flags.

use crate::utils::error::WrapperError;
use crate::utils::fs::ensure_directory;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default format selector
pub const DEFAULT_FORMAT: &str = "best";

/// Format selector used for audio downloads
pub const AUDIO_FORMAT: &str = "bestaudio/best";

/// File name pattern appended to the target directory
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Codec requested from the audio extraction postprocessor
pub const AUDIO_CODEC: &str = "mp3";

/// Audio bitrate in kbps
pub const AUDIO_QUALITY: &str = "192";

/// User agent sent on audio downloads
pub const AUDIO_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Postprocessing steps the engine runs after fetching
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "key")]
pub enum Postprocessor {
    #[serde(rename = "FFmpegExtractAudio")]
    ExtractAudio {
        #[serde(rename = "preferredcodec")]
        codec: String,
        #[serde(rename = "preferredquality")]
        quality: String,
    },
}

/// Per-call configuration for the extraction engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineOptions {
    pub format: String,

    #[serde(rename = "outtmpl")]
    pub output_template: PathBuf,

    /// Inverse of "is this a playlist": `true` makes the engine treat the URL
    /// as a single item even if it resolves to a collection.
    #[serde(rename = "noplaylist")]
    pub no_playlist: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub postprocessors: Vec<Postprocessor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl EngineOptions {
    /// Directory the output template writes into
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_template.parent()
    }

    /// Render as yt-dlp command-line flags
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            self.format.clone().into(),
            "-o".into(),
            self.output_template.clone().into_os_string(),
        ];

        args.push(if self.no_playlist {
            "--no-playlist".into()
        } else {
            "--yes-playlist".into()
        });

        for pp in &self.postprocessors {
            match pp {
                Postprocessor::ExtractAudio { codec, quality } => {
                    args.push("-x".into());
                    args.push("--audio-format".into());
                    args.push(codec.into());
                    args.push("--audio-quality".into());
                    args.push(format!("{}K", quality).into());
                }
            }
        }

        if let Some(ua) = &self.user_agent {
            args.push("--user-agent".into());
            args.push(ua.into());
        }

        args
    }
}

/// Options for a general download or info probe.
///
/// Creates `directory` first, so the template never points at a missing path.
pub fn build_default_options(
    format: &str,
    is_playlist: bool,
    directory: impl AsRef<Path>,
) -> Result<EngineOptions, WrapperError> {
    let directory = directory.as_ref();
    ensure_directory(directory)?;

    Ok(EngineOptions {
        format: format.to_string(),
        output_template: directory.join(OUTPUT_TEMPLATE),
        no_playlist: !is_playlist,
        postprocessors: Vec::new(),
        user_agent: None,
    })
}

/// Options for extracting an mp3 track from a single video
pub fn build_audio_options(directory: impl AsRef<Path>) -> Result<EngineOptions, WrapperError> {
    let directory = directory.as_ref();
    ensure_directory(directory)?;

    Ok(EngineOptions {
        format: AUDIO_FORMAT.to_string(),
        output_template: directory.join(OUTPUT_TEMPLATE),
        no_playlist: true,
        postprocessors: vec![Postprocessor::ExtractAudio {
            codec: AUDIO_CODEC.to_string(),
            quality: AUDIO_QUALITY.to_string(),
        }],
        user_agent: Some(AUDIO_USER_AGENT.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn args_as_strings(opts: &EngineOptions) -> Vec<String> {
        opts.to_args()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_playlist_flag_is_inverted() {
        let temp = tempdir().unwrap();

        let single = build_default_options(DEFAULT_FORMAT, false, temp.path()).unwrap();
        assert!(single.no_playlist);

        let playlist = build_default_options(DEFAULT_FORMAT, true, temp.path()).unwrap();
        assert!(!playlist.no_playlist);
    }

    #[test]
    fn test_builder_creates_directory() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("fresh/nested");

        let opts = build_default_options("worst", false, &dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(opts.output_template, dir.join("%(title)s.%(ext)s"));
        assert_eq!(opts.output_dir(), Some(dir.as_path()));
        assert_eq!(opts.format, "worst");
    }

    #[test]
    fn test_serializes_with_engine_keys() {
        let temp = tempdir().unwrap();
        let opts = build_default_options("best", true, temp.path()).unwrap();

        let value = serde_json::to_value(&opts).unwrap();
        assert_eq!(value["format"], json!("best"));
        assert_eq!(value["noplaylist"], json!(false));
        assert!(value["outtmpl"].as_str().unwrap().ends_with("%(title)s.%(ext)s"));
        assert!(value.get("postprocessors").is_none());
        assert!(value.get("user_agent").is_none());
    }

    #[test]
    fn test_audio_options() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("audio");

        let opts = build_audio_options(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(opts.format, "bestaudio/best");
        assert!(opts.no_playlist);
        assert_eq!(opts.user_agent.as_deref(), Some(AUDIO_USER_AGENT));

        let value = serde_json::to_value(&opts).unwrap();
        assert_eq!(
            value["postprocessors"],
            json!([{
                "key": "FFmpegExtractAudio",
                "preferredcodec": "mp3",
                "preferredquality": "192",
            }])
        );
    }

    #[test]
    fn test_args_for_single_video() {
        let temp = tempdir().unwrap();
        let opts = build_default_options("best", false, temp.path()).unwrap();
        let args = args_as_strings(&opts);

        assert_eq!(args[0..2], ["-f", "best"]);
        assert_eq!(args[2], "-o");
        assert!(args.contains(&"--no-playlist".to_string()));
        assert!(!args.contains(&"--yes-playlist".to_string()));
        assert!(!args.contains(&"-x".to_string()));
    }

    #[test]
    fn test_args_for_playlist() {
        let temp = tempdir().unwrap();
        let opts = build_default_options("best", true, temp.path()).unwrap();
        let args = args_as_strings(&opts);

        assert!(args.contains(&"--yes-playlist".to_string()));
        assert!(!args.contains(&"--no-playlist".to_string()));
    }

    #[test]
    fn test_args_for_audio() {
        let temp = tempdir().unwrap();
        let opts = build_audio_options(temp.path()).unwrap();
        let args = args_as_strings(&opts);

        let x = args.iter().position(|a| a == "-x").expect("-x flag");
        assert_eq!(
            args[x..x + 5],
            ["-x", "--audio-format", "mp3", "--audio-quality", "192K"]
        );
        let ua = args.iter().position(|a| a == "--user-agent").expect("ua flag");
        assert_eq!(args[ua + 1], AUDIO_USER_AGENT);
    }
}
