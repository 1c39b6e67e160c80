use serde::{Deserialize, Serialize};

use crate::domain::{TutorialId, TutorialRecord};

pub mod routes {
    pub const TUTORIALS: &str = "/tutorials";
    pub const UPLOAD_TRANSCRIPT: &str = "/uploadTranscript";
    pub const UPLOAD_VIDEO: &str = "/uploadVideo";
    pub const EDIT_TUTORIAL: &str = "/editTutorial";
    pub const GET_VIDEO: &str = "/getVideo/";
}

pub const TRANSCRIPT_FIELD: &str = "transcript";
pub const VIDEO_FIELD: &str = "video";

pub const TRANSCRIPT_MIME: &str = "application/json";
pub const VIDEO_MIME: &str = "video/mp4";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorialList {
    #[serde(default)]
    pub tutorials: Vec<TutorialRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploaderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoQuery {
    pub video_name: String,
}

/// Whole-record payload for `/editTutorial`. The service only applies
/// `content`; the remaining fields identify the row and satisfy its schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditTutorialRequest {
    pub id: TutorialId,
    pub content: String,
    pub uploader: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl EditTutorialRequest {
    pub fn with_content(record: &TutorialRecord, content: impl Into<String>) -> Self {
        Self {
            id: record.id,
            content: content.into(),
            uploader: record.uploader_display().to_string(),
            timestamp: record.timestamp.clone(),
            transcript: record.transcript.clone(),
            clips: record.range_encoding.clone(),
            video: record.video_asset.clone(),
        }
    }
}
