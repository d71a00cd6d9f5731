//! Data structures for engine results

use serde_json::{Map, Value};

/// Result mapping returned by the engine, passed through untouched
pub type InfoDict = Map<String, Value>;

/// Display view over an [`InfoDict`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    /// `webpage_url`, falling back to `url`
    pub webpage_url: Option<String>,
    /// Seconds; yt-dlp reports fractional durations for some sites
    pub duration: Option<f64>,
    pub description: Option<String>,
    pub uploader: Option<String>,
    pub extractor: Option<String>,
    /// Entry count when the result is a playlist
    pub entries: Option<usize>,
}

impl VideoSummary {
    /// Read the common fields out of an engine result. Fields with an
    /// unexpected type are treated as missing.
    pub fn from_info(info: &InfoDict) -> Self {
        let text = |key: &str| info.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            id: text("id"),
            title: text("title"),
            webpage_url: text("webpage_url").or_else(|| text("url")),
            duration: info.get("duration").and_then(Value::as_f64),
            description: text("description"),
            uploader: text("uploader"),
            extractor: text("extractor"),
            entries: info
                .get("entries")
                .and_then(Value::as_array)
                .map(Vec::len),
        }
    }

    pub fn is_playlist(&self) -> bool {
        self.entries.is_some()
    }
}
