use async_trait::async_trait;
use shared::{
    domain::TutorialRecord,
    protocol::{TRANSCRIPT_MIME, VIDEO_MIME},
};

use crate::error::{RemoteFailure, ValidationError};

/// Access to the remote tutorial service.
///
/// Nothing is cached: every `list` is a fresh fetch so a table always shows
/// the server's state after a mutation.
#[async_trait]
pub trait TutorialStore: Send + Sync {
    /// `None` lists the uploads made without a handle.
    async fn list(&self, uploader: Option<&str>) -> Result<Vec<TutorialRecord>, RemoteFailure>;
    async fn upload_transcript(
        &self,
        upload: TranscriptUpload,
        uploader: &str,
    ) -> Result<(), RemoteFailure>;
    async fn upload_video(&self, upload: VideoUpload, uploader: &str)
        -> Result<(), RemoteFailure>;
    /// Replaces the content of `record` on the service. Other fields are left
    /// as they are server-side.
    async fn mutate_content(
        &self,
        record: &TutorialRecord,
        new_content: &str,
    ) -> Result<(), RemoteFailure>;
    async fn fetch_video_asset(&self, asset_ref: &str) -> Result<Vec<u8>, RemoteFailure>;
}

/// File payload that passed the pre-flight type check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    fn checked(
        file_name: impl Into<String>,
        declared_type: &str,
        bytes: Vec<u8>,
        expected: &'static str,
    ) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(ValidationError::MissingFileName);
        }
        if !declared_type.trim().eq_ignore_ascii_case(expected) {
            return Err(ValidationError::UnexpectedType {
                expected,
                actual: declared_type.to_string(),
            });
        }
        if bytes.is_empty() {
            return Err(ValidationError::EmptyFile { file_name });
        }
        Ok(Self {
            file_name,
            mime_type: expected,
            bytes,
        })
    }
}

/// A JSON transcript ready for `/uploadTranscript`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptUpload(UploadFile);

impl TranscriptUpload {
    pub fn new(
        file_name: impl Into<String>,
        declared_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        UploadFile::checked(file_name, declared_type, bytes, TRANSCRIPT_MIME).map(Self)
    }

    pub fn file(&self) -> &UploadFile {
        &self.0
    }

    pub fn into_file(self) -> UploadFile {
        self.0
    }
}

/// An MP4 recording ready for `/uploadVideo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUpload(UploadFile);

impl VideoUpload {
    pub fn new(
        file_name: impl Into<String>,
        declared_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        UploadFile::checked(file_name, declared_type, bytes, VIDEO_MIME).map(Self)
    }

    pub fn file(&self) -> &UploadFile {
        &self.0
    }

    pub fn into_file(self) -> UploadFile {
        self.0
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
