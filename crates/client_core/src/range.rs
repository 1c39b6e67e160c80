//! Decoding of the compact clip range encoding (`START-END|START-END...`).
//!
//! Time literals are `MM:SS` or `HH:MM:SS`. Segments that do not decode are
//! skipped one at a time so a single corrupt entry never hides its siblings.

use std::fmt;

use thiserror::Error;
use tracing::debug;

const SEGMENT_SEPARATOR: char = '|';
const BOUNDARY_SEPARATOR: char = '-';
const FIELD_SEPARATOR: char = ':';

/// A named interval of a tutorial video, derived from its range encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub index: usize,
    pub label: String,
    pub start_seconds: u32,
    pub end_seconds: u32,
    pub raw_range: String,
}

impl Clip {
    pub fn id(&self) -> String {
        format!("clip-{}", self.index)
    }

    /// Zero for a hand-built clip whose end is not after its start.
    pub fn duration_seconds(&self) -> u32 {
        self.end_seconds.saturating_sub(self.start_seconds)
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.raw_range)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum SegmentError {
    #[error("missing '-' between start and end")]
    MissingSeparator,
    #[error("invalid time literal {0:?}")]
    InvalidTime(String),
    #[error("end {end}s is not after start {start}s")]
    EmptyInterval { start: u32, end: u32 },
}

/// Parses a range encoding into clips, in encoding order.
///
/// `None` and the empty string yield no clips. Invalid segments are dropped;
/// surviving clips are numbered by their position in the output.
pub fn parse_ranges(encoding: Option<&str>) -> Vec<Clip> {
    let Some(encoding) = encoding.filter(|e| !e.trim().is_empty()) else {
        return Vec::new();
    };

    let mut clips = Vec::new();
    for segment in encoding.split(SEGMENT_SEPARATOR) {
        match parse_segment(segment) {
            Ok((start_seconds, end_seconds)) => {
                let index = clips.len();
                clips.push(Clip {
                    index,
                    label: format!("Step {}", index + 1),
                    start_seconds,
                    end_seconds,
                    raw_range: segment.trim().to_string(),
                });
            }
            Err(err) => debug!(segment, reason = %err, "skipping clip range segment"),
        }
    }
    clips
}

fn parse_segment(segment: &str) -> Result<(u32, u32), SegmentError> {
    let (start, end) = segment
        .split_once(BOUNDARY_SEPARATOR)
        .ok_or(SegmentError::MissingSeparator)?;
    let start = time_to_seconds(start).ok_or_else(|| SegmentError::InvalidTime(start.into()))?;
    let end = time_to_seconds(end).ok_or_else(|| SegmentError::InvalidTime(end.into()))?;
    if end <= start {
        return Err(SegmentError::EmptyInterval { start, end });
    }
    Ok((start, end))
}

/// Converts `MM:SS` or `HH:MM:SS` to seconds. Any other shape is `None`.
pub fn time_to_seconds(literal: &str) -> Option<u32> {
    let mut fields = Vec::with_capacity(3);
    for field in literal.trim().split(FIELD_SEPARATOR) {
        let field = field.trim();
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        fields.push(field.parse::<u32>().ok()?);
    }

    match fields.as_slice() {
        [minutes, seconds] => minutes.checked_mul(60)?.checked_add(*seconds),
        [hours, minutes, seconds] => hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(*seconds),
        _ => None,
    }
}

/// Formats seconds as `MM:SS`, or `HH:MM:SS` from one hour up.
pub fn seconds_to_time(total: u32) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
#[path = "tests/range_tests.rs"]
mod tests;
