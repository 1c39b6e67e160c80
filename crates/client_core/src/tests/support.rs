use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use shared::domain::{TutorialId, TutorialRecord};

use crate::{
    error::RemoteFailure,
    store::{TranscriptUpload, TutorialStore, VideoUpload},
};

pub fn text_record(id: i64, content: &str) -> TutorialRecord {
    TutorialRecord {
        id: TutorialId(id),
        content: content.to_string(),
        uploader: Some("octocat".into()),
        timestamp: "2024-05-01 09:30:00".into(),
        transcript: Some("{\"lines\":[]}".into()),
        range_encoding: None,
        video_asset: None,
    }
}

pub fn video_record(id: i64, clips: &str) -> TutorialRecord {
    TutorialRecord {
        id: TutorialId(id),
        content: "Step one\n\nStep two".into(),
        uploader: Some("octocat".into()),
        timestamp: "2024-05-01 09:30:00".into(),
        transcript: None,
        range_encoding: Some(clips.to_string()),
        video_asset: Some(format!("video-{id}.mp4")),
    }
}

/// In-memory stand-in for the tutorial service.
#[derive(Default)]
pub struct MemoryStore {
    pub records: Mutex<Vec<TutorialRecord>>,
    pub fail_mutations: AtomicBool,
    pub fail_lists: AtomicBool,
    pub fail_uploads: AtomicBool,
    pub list_calls: AtomicUsize,
    pub mutate_calls: AtomicUsize,
    pub uploads: Mutex<Vec<(String, String)>>,
    pub list_filters: Mutex<Vec<Option<String>>>,
}

impl MemoryStore {
    pub fn with_records(records: Vec<TutorialRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn content_of(&self, id: i64) -> Option<String> {
        self.records
            .lock()
            .expect("records")
            .iter()
            .find(|r| r.id == TutorialId(id))
            .map(|r| r.content.clone())
    }

    fn failure(endpoint: &'static str) -> RemoteFailure {
        RemoteFailure::status(endpoint, 500, br#"{"detail":"service unavailable"}"#)
    }
}

#[async_trait]
impl TutorialStore for MemoryStore {
    async fn list(&self, uploader: Option<&str>) -> Result<Vec<TutorialRecord>, RemoteFailure> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_filters
            .lock()
            .expect("filters")
            .push(uploader.map(str::to_string));
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(Self::failure("/tutorials"));
        }
        Ok(self.records.lock().expect("records").clone())
    }

    async fn upload_transcript(
        &self,
        upload: TranscriptUpload,
        uploader: &str,
    ) -> Result<(), RemoteFailure> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(Self::failure("/uploadTranscript"));
        }
        let file = upload.into_file();
        self.uploads
            .lock()
            .expect("uploads")
            .push((file.file_name.clone(), uploader.to_string()));
        let mut records = self.records.lock().expect("records");
        let id = records.len() as i64 + 100;
        let mut record = text_record(id, &format!("generated from {}", file.file_name));
        record.uploader = Some(uploader.to_string());
        records.push(record);
        Ok(())
    }

    async fn upload_video(&self, upload: VideoUpload, uploader: &str) -> Result<(), RemoteFailure> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(Self::failure("/uploadVideo"));
        }
        let file = upload.into_file();
        self.uploads
            .lock()
            .expect("uploads")
            .push((file.file_name.clone(), uploader.to_string()));
        let mut records = self.records.lock().expect("records");
        let id = records.len() as i64 + 100;
        let mut record = video_record(id, "00:00-00:05");
        record.video_asset = Some(file.file_name);
        records.push(record);
        Ok(())
    }

    async fn mutate_content(
        &self,
        record: &TutorialRecord,
        new_content: &str,
    ) -> Result<(), RemoteFailure> {
        self.mutate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::failure("/editTutorial"));
        }
        let mut records = self.records.lock().expect("records");
        if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
            existing.content = new_content.to_string();
        }
        Ok(())
    }

    async fn fetch_video_asset(&self, asset_ref: &str) -> Result<Vec<u8>, RemoteFailure> {
        let known = self
            .records
            .lock()
            .expect("records")
            .iter()
            .any(|r| r.video_asset.as_deref() == Some(asset_ref));
        if !known {
            return Err(RemoteFailure::status(
                "/getVideo/",
                404,
                br#"{"detail":"Video not found"}"#,
            ));
        }
        Ok(format!("mp4:{asset_ref}").into_bytes())
    }
}
