//! Wrapper configuration

use crate::utils::error::WrapperError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Wrapper settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapperSettings {
    /// Where downloads land when a call doesn't name a directory
    pub download_dir: PathBuf,

    /// Explicit yt-dlp binary; searched for when unset
    pub ytdlp_path: Option<PathBuf>,
}

impl Default for WrapperSettings {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from(crate::downloader::DEFAULT_DOWNLOAD_DIR),
            ytdlp_path: None,
        }
    }
}

impl WrapperSettings {
    /// Read settings from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WrapperError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| WrapperError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| WrapperError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = WrapperSettings::default();
        assert_eq!(config.download_dir, PathBuf::from("downloads"));
        assert!(config.ytdlp_path.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{ "ytdlp_path": "/opt/bin/yt-dlp" }"#).unwrap();

        let config = WrapperSettings::load(&path).expect("load");
        assert_eq!(config.download_dir, PathBuf::from("downloads"));
        assert_eq!(config.ytdlp_path, Some(PathBuf::from("/opt/bin/yt-dlp")));
    }

    #[test]
    fn test_malformed_file_is_settings_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        match WrapperSettings::load(&path) {
            Err(WrapperError::SettingsParse { path: reported, source }) => {
                assert_eq!(reported, path);
                assert!(source.is_syntax());
            }
            other => panic!("expected SettingsParse, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_settings_error() {
        let temp = tempdir().unwrap();
        match WrapperSettings::load(temp.path().join("absent.json")) {
            Err(WrapperError::SettingsRead { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected SettingsRead, got {:?}", other),
        }
    }
}
