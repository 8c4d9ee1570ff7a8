use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::Result;
use log::debug;
use crate::subtitle_event::SubtitleEvent;

// @module: Standalone SRT time-shift utility

// @const: SRT time range line (flexible millisecond width on input)
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2},\d+)\s*-->\s*(\d{2}:\d{2}:\d{2},\d+)").unwrap()
});

// @const: Blank-line block separator
static BLANK_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

// @struct: One SRT block with its raw text kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtBlock {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Block text, possibly multi-line
    pub text: String,
}

// @struct: Shift parameters
#[derive(Debug, Clone)]
pub struct SyncAdjustment {
    // @field: Offset applied to every block before the marker, in ms (may be negative)
    pub global_offset_ms: i64,

    // @field: Marker phrase, matched case-insensitively as a substring
    pub marker: Option<String>,

    // @field: Offset replacing the global one at and after the first marker match
    pub post_marker_offset_ms: Option<i64>,
}

/// Parse SRT content into blocks. Blocks without a valid time range line or
/// with no text are skipped.
pub fn parse_srt_blocks(content: &str) -> Vec<SrtBlock> {
    let mut blocks = Vec::new();

    for raw in BLANK_LINE_REGEX.split(content.trim()) {
        let lines: Vec<&str> = raw.trim().lines().collect();
        if lines.len() < 3 {
            continue;
        }

        let caps = match TIME_RANGE_REGEX.captures(lines[1]) {
            Some(caps) => caps,
            None => continue,
        };
        let start_ms = match SubtitleEvent::parse_srt_timestamp(&caps[1]) {
            Ok(ms) => ms,
            Err(_) => continue,
        };
        let end_ms = match SubtitleEvent::parse_srt_timestamp(&caps[2]) {
            Ok(ms) => ms,
            Err(_) => continue,
        };

        blocks.push(SrtBlock {
            start_ms,
            end_ms,
            text: lines[2..].join("\n"),
        });
    }

    blocks
}

/// Apply the sync adjustment to a block sequence.
///
/// Before the marker phrase first appears, the global offset applies. From the
/// first block whose text contains the marker (case-insensitive) onward, the
/// post-marker offset replaces the global one entirely. Shifted times clamp
/// at zero.
pub fn adjust_blocks(blocks: &mut [SrtBlock], adjustment: &SyncAdjustment) {
    let marker_lower = adjustment.marker.as_ref().map(|m| m.to_lowercase());
    let mut found = false;

    for block in blocks.iter_mut() {
        if let Some(marker) = &marker_lower {
            if !found && !marker.is_empty() && block.text.to_lowercase().contains(marker) {
                found = true;
            }
        }

        let offset = if found {
            adjustment
                .post_marker_offset_ms
                .unwrap_or(adjustment.global_offset_ms)
        } else {
            adjustment.global_offset_ms
        };

        block.start_ms = shift_clamped(block.start_ms, offset);
        block.end_ms = shift_clamped(block.end_ms, offset);
    }
}

/// Rebuild SRT content from blocks, renumbering sequentially from 1
pub fn build_srt_content(blocks: &[SrtBlock]) -> String {
    let mut out: Vec<String> = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        out.push((i + 1).to_string());
        out.push(format!(
            "{} --> {}",
            SubtitleEvent::format_srt_timestamp(block.start_ms),
            SubtitleEvent::format_srt_timestamp(block.end_ms)
        ));
        out.push(block.text.clone());
        out.push(String::new());
    }

    let mut content = out.join("\n");
    let trimmed_len = content.trim_end().len();
    content.truncate(trimmed_len);
    content.push('\n');
    content
}

/// Shift one SRT document, returning the rebuilt content and the block count
pub fn adjust_srt_content(content: &str, adjustment: &SyncAdjustment) -> Result<(String, usize)> {
    let mut blocks = parse_srt_blocks(content);
    debug!("Parsed {} SRT blocks for sync adjustment", blocks.len());
    adjust_blocks(&mut blocks, adjustment);
    let count = blocks.len();
    Ok((build_srt_content(&blocks), count))
}

/// Add a signed offset to an unsigned timestamp, clamping at zero
fn shift_clamped(ms: u64, offset: i64) -> u64 {
    let shifted = ms as i64 + offset;
    shifted.max(0) as u64
}
