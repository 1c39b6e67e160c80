use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Uploader handle the service stores when nobody is signed in.
pub const ANONYMOUS_UPLOADER: &str = "Anonymous";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PROFILE_BASE_URL: &str = "https://github.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TutorialId(pub i64);

impl fmt::Display for TutorialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A generated tutorial as persisted by the remote service.
///
/// `clips` carries the compact range encoding (`START-END|START-END...`) and
/// `video` the name of the asset it refers to. Text tutorials carry the source
/// `transcript` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialRecord {
    pub id: TutorialId,
    pub content: String,
    #[serde(default)]
    pub uploader: Option<String>,
    pub timestamp: String,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default, rename = "clips")]
    pub range_encoding: Option<String>,
    #[serde(default, rename = "video")]
    pub video_asset: Option<String>,
}

impl TutorialRecord {
    pub fn has_video(&self) -> bool {
        self.video_asset.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Range encoding for the record's video. Ignored when no video is attached.
    pub fn clip_encoding(&self) -> Option<&str> {
        if self.has_video() {
            self.range_encoding.as_deref()
        } else {
            None
        }
    }

    /// Parses the creation timestamp. The service formats it as
    /// `YYYY-MM-DD HH:MM:SS`; anything else yields `None`.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.timestamp.trim(), TIMESTAMP_FORMAT).ok()
    }

    /// JSON document offered for download on text tutorials.
    pub fn transcript_export(&self) -> Option<String> {
        let transcript = self.transcript.as_ref()?;
        serde_json::to_string(transcript).ok()
    }

    pub fn uploader_display(&self) -> &str {
        self.uploader.as_deref().unwrap_or(ANONYMOUS_UPLOADER)
    }
}

pub fn uploader_profile_url(uploader: Option<&str>) -> Option<String> {
    match uploader.map(str::trim) {
        Some(handle) if !handle.is_empty() && handle != ANONYMOUS_UPLOADER => {
            Some(format!("{PROFILE_BASE_URL}/{handle}"))
        }
        _ => None,
    }
}
