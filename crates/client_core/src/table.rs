//! Table-level controller: the rows on screen, the uploads that feed them and
//! the edit cursor over them.

use std::sync::Arc;

use shared::domain::{TutorialId, TutorialRecord, ANONYMOUS_UPLOADER};
use tracing::{info, warn};

use crate::{
    edit_session::{EditSession, SaveReport},
    error::{RemoteFailure, TableError},
    store::{TranscriptUpload, TutorialStore, VideoUpload},
};

/// Outcome of an accepted upload. The file is stored server-side whatever
/// `refresh` says.
#[derive(Debug)]
pub struct UploadReport {
    pub file_name: String,
    pub refresh: Result<(), RemoteFailure>,
}

impl UploadReport {
    pub fn is_listed(&self) -> bool {
        self.refresh.is_ok()
    }
}

pub struct TutorialTable {
    store: Arc<dyn TutorialStore>,
    uploader: Option<String>,
    rows: Vec<TutorialRecord>,
    session: EditSession,
}

impl TutorialTable {
    pub fn new(store: Arc<dyn TutorialStore>, uploader: Option<String>) -> Self {
        let session = EditSession::new(Arc::clone(&store), uploader.clone());
        Self {
            store,
            uploader,
            rows: Vec::new(),
            session,
        }
    }

    pub fn uploader(&self) -> Option<&str> {
        self.uploader.as_deref()
    }

    pub fn rows(&self) -> &[TutorialRecord] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: TutorialId) -> Option<&TutorialRecord> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Replaces the rows with a fresh fetch. On failure the previous rows stay.
    pub async fn refresh(&mut self) -> Result<&[TutorialRecord], RemoteFailure> {
        self.rows = self.store.list(self.uploader.as_deref()).await?;
        Ok(&self.rows)
    }

    pub fn begin_edit(&mut self, id: TutorialId) -> Result<Option<TutorialId>, TableError> {
        let record = self.find(id).ok_or(TableError::UnknownTutorial(id))?.clone();
        Ok(self.session.begin_edit(&record))
    }

    pub fn update_draft(&mut self, content: impl Into<String>) -> Result<(), TableError> {
        Ok(self.session.update_draft(content)?)
    }

    pub fn cancel_edit(&mut self) -> Option<TutorialId> {
        self.session.cancel()
    }

    /// Saves the open draft. Rows are replaced when the post-save refresh
    /// succeeds, whether or not the edit itself was persisted.
    pub async fn save_edit(&mut self) -> Result<SaveReport, TableError> {
        let report = self.session.save().await?;
        if let Ok(rows) = &report.refresh {
            self.rows = rows.clone();
        }
        Ok(report)
    }

    /// Sends a transcript for generation. `Err` means the service did not
    /// accept the file; a failed refresh afterwards is only reported.
    pub async fn upload_transcript(
        &mut self,
        upload: TranscriptUpload,
    ) -> Result<UploadReport, RemoteFailure> {
        let file_name = upload.file().file_name.clone();
        self.store
            .upload_transcript(upload, self.upload_handle())
            .await?;
        info!(file_name = %file_name, "transcript accepted, refreshing tutorials");
        Ok(self.refresh_after_upload(file_name).await)
    }

    pub async fn upload_video(
        &mut self,
        upload: VideoUpload,
    ) -> Result<UploadReport, RemoteFailure> {
        let file_name = upload.file().file_name.clone();
        self.store.upload_video(upload, self.upload_handle()).await?;
        info!(file_name = %file_name, "video accepted, refreshing tutorials");
        Ok(self.refresh_after_upload(file_name).await)
    }

    async fn refresh_after_upload(&mut self, file_name: String) -> UploadReport {
        let refresh = self.refresh().await.map(|_| ());
        if let Err(err) = &refresh {
            warn!(
                file_name = %file_name,
                error = %err,
                "tutorial list refresh failed after upload"
            );
        }
        UploadReport { file_name, refresh }
    }

    fn upload_handle(&self) -> &str {
        self.uploader.as_deref().unwrap_or(ANONYMOUS_UPLOADER)
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
