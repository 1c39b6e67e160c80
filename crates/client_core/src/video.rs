use shared::domain::TutorialRecord;
use tracing::info;

use crate::{
    error::VideoError,
    playback::{ClipPlaybackController, MediaHandle},
    range::{parse_ranges, Clip},
    store::TutorialStore,
};

/// A video tutorial materialised for playback: the asset bytes plus the clips
/// derived from the record's range encoding.
#[derive(Debug, Clone)]
pub struct VideoTutorial {
    pub asset_ref: String,
    pub asset: Vec<u8>,
    pub clips: Vec<Clip>,
}

impl VideoTutorial {
    pub async fn open(
        store: &dyn TutorialStore,
        record: &TutorialRecord,
    ) -> Result<Self, VideoError> {
        let asset_ref = record
            .video_asset
            .as_deref()
            .filter(|_| record.has_video())
            .ok_or(VideoError::NoVideo(record.id))?;

        let asset = store.fetch_video_asset(asset_ref).await?;
        let clips = parse_ranges(record.clip_encoding());
        info!(
            tutorial_id = record.id.0,
            asset_ref,
            clips = clips.len(),
            "opened video tutorial"
        );

        Ok(Self {
            asset_ref: asset_ref.to_string(),
            asset,
            clips,
        })
    }

    /// Hands the clips to a controller driving `media`. The host is expected
    /// to have loaded `asset` into `media` already.
    pub fn into_controller<M: MediaHandle>(self, media: M) -> ClipPlaybackController<M> {
        ClipPlaybackController::new(media, self.clips)
    }
}

#[cfg(test)]
#[path = "tests/video_tests.rs"]
mod tests;
