use crate::segment_builder::Segment;

// @module: Styled payload construction and final dialogue-line fixing

/// Non-rendering marker emitted before the Japanese block, parsed at playback time
pub const JAPANESE_MARKER: &str = "{!JP}";

/// Non-rendering marker emitted before the Korean block, parsed at playback time
pub const KOREAN_MARKER: &str = "{!KR}";

/// Shared payload header: bottom-center alignment, no auto-wrap, minimal outline/shadow
pub const PAYLOAD_HEADER: &str = r"{\r\an2\q2\bord2\shad0}";

/// Minimum visible duration of a fused dialogue line, in milliseconds
pub const MIN_FUSED_DURATION_MS: u64 = 220;

// @struct: Per-language font styling applied to fused payloads
#[derive(Debug, Clone)]
pub struct LineStyle {
    // @field: Korean line font name
    pub korean_font: String,

    // @field: Japanese line font name
    pub japanese_font: String,

    // @field: Korean line font size
    pub korean_font_size: u32,

    // @field: Japanese line font size
    pub japanese_font_size: u32,
}

// @struct: Finalized output unit ready for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusedLine {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Fully styled, marker-tagged text block
    pub payload: String,
}

/// Convert segments into the final dialogue-line sequence.
///
/// Three passes, each a left-to-right fold:
/// 1. Build the styled payload per segment; segments with no text collapse to
///    the bare header and are discarded.
/// 2. Merge runs of consecutive segments whose payloads are byte-identical
///    into one span.
/// 3. Push any start at or before the previous accepted end to
///    `previous_end + 1`, then extend ends so every line lasts at least 220 ms.
pub fn fuse_segments(segments: &[Segment], style: &LineStyle) -> Vec<FusedLine> {
    let mut merged: Vec<FusedLine> = Vec::new();
    for segment in segments {
        let payload = match build_payload(segment, style) {
            Some(payload) => payload,
            None => continue,
        };

        match merged.last_mut() {
            Some(last) if last.payload == payload => last.end_ms = segment.end_ms,
            _ => merged.push(FusedLine {
                start_ms: segment.start_ms,
                end_ms: segment.end_ms,
                payload,
            }),
        }
    }

    let mut fixed: Vec<FusedLine> = Vec::with_capacity(merged.len());
    for mut line in merged {
        if let Some(previous) = fixed.last() {
            if line.start_ms <= previous.end_ms {
                line.start_ms = previous.end_ms + 1;
            }
        }
        if line.end_ms < line.start_ms + MIN_FUSED_DURATION_MS {
            line.end_ms = line.start_ms + MIN_FUSED_DURATION_MS;
        }
        fixed.push(line);
    }

    fixed
}

/// Build the styled payload for one segment, or `None` when neither language
/// has content.
///
/// The Japanese block renders below the Korean one, so it comes first in the
/// payload. Each block is a language marker, a font/size override, then the
/// lines joined with explicit `\N` breaks.
fn build_payload(segment: &Segment, style: &LineStyle) -> Option<String> {
    let mut payload = String::from(PAYLOAD_HEADER);

    if let Some(japanese) = &segment.japanese {
        payload.push_str(JAPANESE_MARKER);
        payload.push_str(&format!(
            r"{{\r\fn{}\fs{}}}",
            style.japanese_font, style.japanese_font_size
        ));
        payload.push_str(&join_as_ass_lines(japanese));
    }

    if let Some(korean) = &segment.korean {
        if segment.japanese.is_some() {
            payload.push_str("\\N");
        }
        payload.push_str(KOREAN_MARKER);
        payload.push_str(&format!(
            r"{{\r\fn{}\fs{}}}",
            style.korean_font, style.korean_font_size
        ));
        payload.push_str(&join_as_ass_lines(korean));
    }

    if payload == PAYLOAD_HEADER {
        None
    } else {
        Some(payload)
    }
}

/// Join lines with ASS line breaks, converting any leftover internal newlines
fn join_as_ass_lines(lines: &[String]) -> String {
    lines.join("\\N").replace('\n', "\\N")
}
