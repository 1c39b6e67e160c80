//! Segment-scoped playback over a host media handle.
//!
//! The controller never drives time itself. The host seeks/plays on its
//! behalf and reports position through [`ClipPlaybackController::on_progress`].

use tracing::{debug, info};

use crate::range::Clip;

/// The host's seekable media element.
pub trait MediaHandle {
    fn seek(&mut self, position_seconds: f64);
    fn play(&mut self);
    fn pause(&mut self);
    fn position(&self) -> f64;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(Clip),
}

pub struct ClipPlaybackController<M: MediaHandle> {
    media: M,
    clips: Vec<Clip>,
    state: PlaybackState,
}

impl<M: MediaHandle> ClipPlaybackController<M> {
    pub fn new(media: M, clips: Vec<Clip>) -> Self {
        Self {
            media,
            clips,
            state: PlaybackState::Idle,
        }
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn active_clip(&self) -> Option<&Clip> {
        match &self.state {
            PlaybackState::Playing(clip) => Some(clip),
            PlaybackState::Idle => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing(_))
    }

    /// Current media position as reported by the handle.
    pub fn position(&self) -> f64 {
        self.media.position()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Seeks to the clip start and plays it. Supersedes any clip already
    /// playing; its end boundary is no longer watched.
    pub fn select_clip(&mut self, clip: Clip) {
        if let PlaybackState::Playing(previous) = &self.state {
            debug!(previous = %previous.id(), next = %clip.id(), "superseding active clip");
        }
        self.media.seek(f64::from(clip.start_seconds));
        self.media.play();
        info!(
            clip = %clip.id(),
            start = clip.start_seconds,
            end = clip.end_seconds,
            "playing clip"
        );
        self.state = PlaybackState::Playing(clip);
    }

    /// Selects one of the controller's own clips by position. Out of range
    /// leaves the state untouched.
    pub fn select_clip_by_index(&mut self, index: usize) -> Option<&Clip> {
        let clip = self.clips.get(index)?.clone();
        self.select_clip(clip);
        self.active_clip()
    }

    /// Host time-update notification. Pauses once the active clip's end is
    /// reached; a no-op while idle.
    pub fn on_progress(&mut self, position_seconds: f64) {
        let PlaybackState::Playing(clip) = &self.state else {
            return;
        };
        if position_seconds >= f64::from(clip.end_seconds) {
            info!(clip = %clip.id(), position = position_seconds, "clip finished");
            self.media.pause();
            self.state = PlaybackState::Idle;
        }
    }

    /// Host reports a pause it issued itself.
    pub fn on_external_pause(&mut self) {
        if let PlaybackState::Playing(clip) = &self.state {
            debug!(clip = %clip.id(), "playback paused externally");
            self.state = PlaybackState::Idle;
        }
    }

    pub fn into_media(self) -> M {
        self.media
    }
}

#[cfg(test)]
#[path = "tests/playback_tests.rs"]
mod tests;
