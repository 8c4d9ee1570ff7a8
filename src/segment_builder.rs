use std::collections::BTreeSet;
use crate::subtitle_event::SubtitleEvent;

// @module: Single-track segment construction from two language tracks

// @struct: Half-open time interval [start_ms, end_ms) with the active lines per language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    // @field: Interval start in ms
    pub start_ms: u64,

    // @field: Interval end in ms (exclusive)
    pub end_ms: u64,

    // @field: Active Korean lines, absent when no Korean event covers the interval
    pub korean: Option<Vec<String>>,

    // @field: Active Japanese lines, absent when no Japanese event covers the interval
    pub japanese: Option<Vec<String>>,
}

/// Merge two normalized event lists into a gap-free sequence of segments.
///
/// Every event start and end across both tracks becomes a cut point; each
/// consecutive cut-point pair `[a, b)` with `b - a >= 1` yields one segment
/// carrying the lines active in that interval per language. Sub-millisecond
/// slivers are dropped.
pub fn build_segments(korean: &[SubtitleEvent], japanese: &[SubtitleEvent]) -> Vec<Segment> {
    let mut cut_points = BTreeSet::new();
    for event in korean.iter().chain(japanese.iter()) {
        cut_points.insert(event.start_ms);
        cut_points.insert(event.end_ms);
    }
    let cuts: Vec<u64> = cut_points.into_iter().collect();

    let mut segments = Vec::new();
    for window in cuts.windows(2) {
        let (a, b) = (window[0], window[1]);
        if b - a < 1 {
            continue;
        }
        segments.push(Segment {
            start_ms: a,
            end_ms: b,
            korean: active_lines(korean, a, b),
            japanese: active_lines(japanese, a, b),
        });
    }

    segments
}

/// Collect the display lines of one track active over `[a, b)`.
///
/// Overlap uses the open-interval test `start < b && end > a`. When several
/// events of the track overlap the interval, only those sharing the maximum
/// start time contribute; earlier-started overlapping events are dropped, not
/// blended. Consecutive identical lines are deduplicated and whitespace is
/// trimmed. Returns `None` when no lines survive.
fn active_lines(events: &[SubtitleEvent], a: u64, b: u64) -> Option<Vec<String>> {
    let overlapping: Vec<&SubtitleEvent> = events
        .iter()
        .filter(|event| event.start_ms < b && event.end_ms > a)
        .collect();

    let latest = overlapping.iter().map(|event| event.start_ms).max()?;

    let mut lines: Vec<String> = Vec::new();
    for event in &overlapping {
        if event.start_ms != latest {
            continue;
        }
        for line in event.text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if lines.last().map(String::as_str) != Some(line) {
                lines.push(line.to_string());
            }
        }
    }

    if lines.is_empty() { None } else { Some(lines) }
}
