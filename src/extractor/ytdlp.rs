//! yt-dlp process engine
//!
//! Runs the yt-dlp executable once per call and reads its result mapping from
//! `--dump-single-json`. Supports both a bundled yt-dlp (next to the binary or
//! inside a macOS .app bundle) and a system-installed one.

use crate::extractor::models::InfoDict;
use crate::extractor::options::EngineOptions;
use crate::extractor::traits::{Engine, ExtractAction};
use crate::utils::error::EngineError;
use async_trait::async_trait;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Extraction engine backed by the yt-dlp binary
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    ytdlp_path: PathBuf,
}

impl YtDlpEngine {
    /// Locate yt-dlp and build an engine around it
    ///
    /// Search order:
    /// 1. Bundled yt-dlp (inside .app bundle for macOS, or next to the executable)
    /// 2. System PATH
    /// 3. Common installation paths (Homebrew, etc.)
    pub fn new() -> Result<Self, EngineError> {
        match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                Ok(Self { ytdlp_path: path })
            }
            None => {
                error!("yt-dlp not found anywhere!");
                Err(EngineError::NotFound)
            }
        }
    }

    /// Use a specific yt-dlp binary
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let path = path.into();
        if !path.is_file() {
            warn!("Configured yt-dlp does not exist: {:?}", path);
            return Err(EngineError::NotFound);
        }
        Ok(Self { ytdlp_path: path })
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }

    /// Version string reported by `yt-dlp --version`
    pub async fn version(&self) -> Result<String, EngineError> {
        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("--version")
            .output()
            .await?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Full argument list for one extraction
pub fn build_args(url: &str, options: &EngineOptions, action: ExtractAction) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--dump-single-json".into(),
        "--no-warnings".into(),
        // One bad playlist item fails the whole call instead of a partial download
        "--abort-on-error".into(),
    ];
    // --dump-single-json implies simulate; undo that when we actually want the files
    if action.downloads() {
        args.push("--no-simulate".into());
    }
    args.extend(options.to_args());
    args.push("--".into());
    args.push(url.into());
    args
}

/// Parse the JSON document yt-dlp writes to stdout
pub fn parse_info(stdout: &[u8]) -> Result<InfoDict, EngineError> {
    let text = std::str::from_utf8(stdout).map_err(|e| EngineError::Parse(e.to_string()))?;

    // Download runs may print non-JSON lines ahead of the document
    let document = text
        .lines()
        .rev()
        .find(|line| line.trim_start().starts_with('{'))
        .ok_or_else(|| EngineError::Parse("no JSON document in yt-dlp output".to_string()))?;

    match serde_json::from_str::<Value>(document) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(EngineError::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(EngineError::Parse(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl Engine for YtDlpEngine {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &EngineOptions,
        action: ExtractAction,
    ) -> Result<InfoDict, EngineError> {
        debug!("Running yt-dlp ({:?}) for URL: {}", action, url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .args(build_args(url, options, action))
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", error_msg.trim());
            return Err(EngineError::Failed {
                status: output.status.code(),
                stderr: error_msg.into_owned(),
            });
        }

        parse_info(&output.stdout)
    }
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Bundled (inside .app bundle or next to the executable)
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(bundled) = find_bundled_ytdlp() {
        info!("✓ Using bundled yt-dlp: {:?}", bundled);
        return Some(bundled);
    }

    if let Some(system) = find_in_path() {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

fn find_bundled_ytdlp() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    // Structure: App.app/Contents/MacOS/<bin>
    //                             /Resources/bin/yt-dlp
    if exe_dir.ends_with("MacOS") {
        let ytdlp_path = exe_dir.parent()?.join("Resources").join("bin").join("yt-dlp");
        debug!("Checking bundled path: {:?}", ytdlp_path);

        if ytdlp_path.is_file() {
            if is_executable(&ytdlp_path) {
                return Some(ytdlp_path);
            }
            warn!("Bundled yt-dlp exists but is not executable: {:?}", ytdlp_path);
        }
    }

    let sibling = exe_dir.join(binary_name());
    if sibling.is_file() && is_executable(&sibling) {
        return Some(sibling);
    }

    None
}

fn find_in_path() -> Option<PathBuf> {
    which::which("yt-dlp").ok().filter(|path| path.exists())
}

fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel)
        "/usr/local/bin/yt-dlp",
        // System
        "/usr/bin/yt-dlp",
        // Python.org installation
        "/Library/Frameworks/Python.framework/Versions/Current/bin/yt-dlp",
        // pip --user
        "~/.local/bin/yt-dlp",
    ];

    common_paths
        .iter()
        .map(|path_str| expand_home(path_str))
        .find(|path| path.is_file() && is_executable(path))
}

fn expand_home(path_str: &str) -> PathBuf {
    match path_str.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path_str)),
        None => PathBuf::from(path_str),
    }
}

fn binary_name() -> &'static str {
    if cfg!(windows) {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.exists()
}

// ============================================================
// Tests
// ============================================================
