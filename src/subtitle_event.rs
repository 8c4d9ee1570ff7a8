use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};

// @module: Subtitle event type and timestamp handling

// @const: ASS timestamp regex (H:MM:SS.CC, centiseconds)
static ASS_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+):(\d{2}):(\d{2})\.(\d{2})").unwrap()
});

/// Minimum visible duration guaranteed after clamping, in milliseconds
pub const MIN_CLAMPED_DURATION_MS: u64 = 200;

/// Replacement duration for events with a non-positive time range
pub const FALLBACK_DURATION_MS: u64 = 1500;

// @struct: Single subtitle event in one language track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEvent {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Event text, may contain internal line breaks
    pub text: String,
}

impl SubtitleEvent {
    /// Create a new subtitle event
    pub fn new(start_ms: u64, end_ms: u64, text: String) -> Self {
        SubtitleEvent {
            start_ms,
            end_ms,
            text,
        }
    }

    /// Parse an ASS timestamp (H:MM:SS.CC) to milliseconds
    pub fn parse_ass_timestamp(timestamp: &str) -> Result<u64> {
        let caps = ASS_TIMESTAMP_REGEX
            .captures(timestamp.trim())
            .ok_or_else(|| anyhow!("Invalid ASS timestamp format: {}", timestamp))?;

        let hours: u64 = caps[1].parse().context("Failed to parse hours")?;
        let minutes: u64 = caps[2].parse().context("Failed to parse minutes")?;
        let seconds: u64 = caps[3].parse().context("Failed to parse seconds")?;
        let centis: u64 = caps[4].parse().context("Failed to parse centiseconds")?;

        Ok(((hours * 60 + minutes) * 60 + seconds) * 1000 + centis * 10)
    }

    /// Format a timestamp in milliseconds to ASS format (H:MM:SS.CC)
    pub fn format_ass_timestamp(ms: u64) -> String {
        let centis = (ms / 10) % 100;
        let seconds = (ms / 1_000) % 60;
        let minutes = (ms / 60_000) % 60;
        let hours = ms / 3_600_000;

        format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis)
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_srt_timestamp(timestamp: &str) -> Result<u64> {
        let parts: Vec<&str> = timestamp.trim().split(&[':', ','][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid SRT timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_srt_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{} --> {}] {}",
            Self::format_ass_timestamp(self.start_ms),
            Self::format_ass_timestamp(self.end_ms),
            self.text
        )
    }
}

/// Normalize end times of a start-sorted event list in a single left-to-right pass.
///
/// Events with a non-positive duration are extended to start + 1500 ms. An end
/// time that runs past the next event's start is clamped to
/// `max(start + 200, next_start - 1)`, so every event keeps at least 200 ms of
/// visible duration and no two events in the track overlap. Already-processed
/// events are never revisited after a clamp.
pub fn normalize_events(events: Vec<SubtitleEvent>) -> Vec<SubtitleEvent> {
    if events.is_empty() {
        return events;
    }

    let mut normalized = Vec::with_capacity(events.len());
    for i in 0..events.len() {
        let mut event = events[i].clone();

        if event.end_ms <= event.start_ms {
            event.end_ms = event.start_ms + FALLBACK_DURATION_MS;
        }

        if i < events.len() - 1 {
            let next_start = events[i + 1].start_ms;
            if event.end_ms > next_start {
                event.end_ms =
                    (event.start_ms + MIN_CLAMPED_DURATION_MS).max(next_start.saturating_sub(1));
            }
        }

        normalized.push(event);
    }

    normalized
}
