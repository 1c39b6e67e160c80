use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, Response,
};
use shared::{
    domain::{TutorialRecord, ANONYMOUS_UPLOADER},
    protocol::{
        routes, EditTutorialRequest, TutorialList, UploaderQuery, VideoQuery, TRANSCRIPT_FIELD,
        VIDEO_FIELD,
    },
};
use tracing::{info, warn};
use url::Url;

pub mod edit_session;
pub mod error;
pub mod playback;
pub mod range;
pub mod store;
pub mod table;
pub mod video;

pub use edit_session::{EditSession, EditState, SaveReport};
pub use error::{EditError, RemoteFailure, TableError, ValidationError, VideoError};
pub use playback::{ClipPlaybackController, MediaHandle, PlaybackState};
pub use range::{parse_ranges, seconds_to_time, time_to_seconds, Clip};
pub use store::{TranscriptUpload, TutorialStore, UploadFile, VideoUpload};
pub use table::{TutorialTable, UploadReport};
pub use video::VideoTutorial;

/// [`TutorialStore`] backed by the tutorial service's HTTP API.
#[derive(Clone)]
pub struct TutorialClient {
    http: Client,
    server_url: String,
}

impl TutorialClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), server_url)
    }

    pub fn with_timeout(
        server_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, server_url))
    }

    pub fn with_http(http: Client, server_url: impl Into<String>) -> Self {
        Self {
            http,
            server_url: server_url.into(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint_url(&self, endpoint: &'static str) -> Result<Url, RemoteFailure> {
        let base = self.server_url.trim_end_matches('/');
        Url::parse(&format!("{base}{endpoint}"))
            .map_err(|source| RemoteFailure::InvalidUrl { endpoint, source })
    }

    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, RemoteFailure> {
        let response = request
            .send()
            .await
            .map_err(|source| RemoteFailure::Transport { endpoint, source })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        warn!(endpoint, status = status.as_u16(), "tutorial service rejected request");
        Err(RemoteFailure::status(endpoint, status.as_u16(), &body))
    }

    async fn upload(
        &self,
        endpoint: &'static str,
        field: &'static str,
        file: UploadFile,
        uploader: &str,
    ) -> Result<(), RemoteFailure> {
        let url = self.endpoint_url(endpoint)?;
        let size_bytes = file.bytes.len();
        let file_name = file.file_name.clone();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(file.mime_type)
            .map_err(|source| RemoteFailure::Transport { endpoint, source })?;
        let request = self
            .http
            .post(url)
            .query(&UploaderQuery {
                uploader: Some(uploader.to_string()),
            })
            .multipart(Form::new().part(field, part));

        self.send(endpoint, request).await?;
        info!(
            endpoint,
            file_name = %file_name,
            size_bytes,
            uploader,
            "uploaded tutorial source"
        );
        Ok(())
    }
}

#[async_trait]
impl TutorialStore for TutorialClient {
    async fn list(&self, uploader: Option<&str>) -> Result<Vec<TutorialRecord>, RemoteFailure> {
        let endpoint = routes::TUTORIALS;
        let uploader = uploader.unwrap_or(ANONYMOUS_UPLOADER);
        let request = self.http.get(self.endpoint_url(endpoint)?).query(&UploaderQuery {
            uploader: Some(uploader.to_string()),
        });
        let body = self
            .send(endpoint, request)
            .await?
            .bytes()
            .await
            .map_err(|source| RemoteFailure::Transport { endpoint, source })?;
        let list: TutorialList = serde_json::from_slice(&body)
            .map_err(|source| RemoteFailure::Decode { endpoint, source })?;

        info!(endpoint, count = list.tutorials.len(), "fetched tutorials");
        Ok(list.tutorials)
    }

    async fn upload_transcript(
        &self,
        upload: TranscriptUpload,
        uploader: &str,
    ) -> Result<(), RemoteFailure> {
        self.upload(
            routes::UPLOAD_TRANSCRIPT,
            TRANSCRIPT_FIELD,
            upload.into_file(),
            uploader,
        )
        .await
    }

    async fn upload_video(
        &self,
        upload: VideoUpload,
        uploader: &str,
    ) -> Result<(), RemoteFailure> {
        self.upload(routes::UPLOAD_VIDEO, VIDEO_FIELD, upload.into_file(), uploader)
            .await
    }

    async fn mutate_content(
        &self,
        record: &TutorialRecord,
        new_content: &str,
    ) -> Result<(), RemoteFailure> {
        let endpoint = routes::EDIT_TUTORIAL;
        let request = self
            .http
            .post(self.endpoint_url(endpoint)?)
            .json(&EditTutorialRequest::with_content(record, new_content));
        self.send(endpoint, request).await?;
        info!(endpoint, tutorial_id = record.id.0, "updated tutorial content");
        Ok(())
    }

    async fn fetch_video_asset(&self, asset_ref: &str) -> Result<Vec<u8>, RemoteFailure> {
        let endpoint = routes::GET_VIDEO;
        let request = self.http.get(self.endpoint_url(endpoint)?).query(&VideoQuery {
            video_name: asset_ref.to_string(),
        });
        let bytes = self
            .send(endpoint, request)
            .await?
            .bytes()
            .await
            .map_err(|source| RemoteFailure::Transport { endpoint, source })?;
        info!(endpoint, asset_ref, size_bytes = bytes.len(), "fetched video asset");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
