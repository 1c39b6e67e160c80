//! Stand-in media element for terminal playback. Position only advances when
//! the host clock ticks it.

use std::time::Duration;

use client_core::MediaHandle;

#[derive(Debug, Clone, Default)]
pub struct SimulatedPlayer {
    position: f64,
    playing: bool,
    rate: f64,
}

impl SimulatedPlayer {
    pub fn with_rate(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.1, 16.0),
            ..Self::default()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Moves the playhead by `elapsed` scaled by the playback rate.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.playing {
            let rate = if self.rate > 0.0 { self.rate } else { 1.0 };
            self.position += elapsed.as_secs_f64() * rate;
        }
    }
}

impl MediaHandle for SimulatedPlayer {
    fn seek(&mut self, position_seconds: f64) {
        self.position = position_seconds.max(0.0);
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn position(&self) -> f64 {
        self.position
    }
}

#[cfg(test)]
#[path = "tests/player_tests.rs"]
mod tests;
