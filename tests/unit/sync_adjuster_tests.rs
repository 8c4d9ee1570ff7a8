/*!
 * Tests for the SRT sync adjustment utility
 */

use bisub::sync_adjuster::{
    SyncAdjustment, adjust_blocks, adjust_srt_content, build_srt_content, parse_srt_blocks,
};

const SRT_SAMPLE: &str = "\
1
00:00:01,000 --> 00:00:03,000
First block

2
00:00:05,000 --> 00:00:07,000
Sponsor message here

3
00:00:10,000 --> 00:00:12,000
Third block
";

fn global_only(offset: i64) -> SyncAdjustment {
    SyncAdjustment {
        global_offset_ms: offset,
        marker: None,
        post_marker_offset_ms: None,
    }
}

/// Test SRT block parsing
#[test]
fn test_parse_srt_blocks_withValidContent_shouldParseAll() {
    let blocks = parse_srt_blocks(SRT_SAMPLE);

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].start_ms, 1000);
    assert_eq!(blocks[0].end_ms, 3000);
    assert_eq!(blocks[0].text, "First block");
    assert_eq!(blocks[2].start_ms, 10_000);
}

/// Test that short or malformed blocks are skipped
#[test]
fn test_parse_srt_blocks_withMalformedBlock_shouldSkipIt() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nGood\n\nlonely line\n\n3\nnot a time range\ntext\n";
    let blocks = parse_srt_blocks(content);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text, "Good");
}

/// Test a positive global shift
#[test]
fn test_adjust_blocks_withGlobalOffset_shouldShiftAll() {
    let mut blocks = parse_srt_blocks(SRT_SAMPLE);
    adjust_blocks(&mut blocks, &global_only(1500));

    assert_eq!(blocks[0].start_ms, 2500);
    assert_eq!(blocks[0].end_ms, 4500);
    assert_eq!(blocks[2].start_ms, 11_500);
}

/// Test that a negative shift clamps at zero
#[test]
fn test_adjust_blocks_withLargeNegativeOffset_shouldClampAtZero() {
    let mut blocks = parse_srt_blocks(SRT_SAMPLE);
    adjust_blocks(&mut blocks, &global_only(-2000));

    assert_eq!(blocks[0].start_ms, 0);
    assert_eq!(blocks[0].end_ms, 1000);
    assert_eq!(blocks[1].start_ms, 3000);
}

/// Test the marker pivot: the post offset replaces the global one from the
/// first matching block onward, it does not stack
#[test]
fn test_adjust_blocks_withMarker_shouldApplyPostOffsetFromMatchOnward() {
    let mut blocks = parse_srt_blocks(SRT_SAMPLE);
    let adjustment = SyncAdjustment {
        global_offset_ms: 1000,
        marker: Some("sponsor".to_string()),
        post_marker_offset_ms: Some(-3000),
    };
    adjust_blocks(&mut blocks, &adjustment);

    // Before the marker: global offset
    assert_eq!(blocks[0].start_ms, 2000);
    // The matching block itself and everything after: post offset only
    assert_eq!(blocks[1].start_ms, 2000);
    assert_eq!(blocks[1].end_ms, 4000);
    assert_eq!(blocks[2].start_ms, 7000);
}

/// Test case-insensitive marker matching
#[test]
fn test_adjust_blocks_withUppercaseMarker_shouldMatchCaseInsensitively() {
    let mut blocks = parse_srt_blocks(SRT_SAMPLE);
    let adjustment = SyncAdjustment {
        global_offset_ms: 0,
        marker: Some("SPONSOR MESSAGE".to_string()),
        post_marker_offset_ms: Some(500),
    };
    adjust_blocks(&mut blocks, &adjustment);

    assert_eq!(blocks[0].start_ms, 1000);
    assert_eq!(blocks[1].start_ms, 5500);
    assert_eq!(blocks[2].start_ms, 10_500);
}

/// Test rebuild renumbering and trailing newline
#[test]
fn test_build_srt_content_withBlocks_shouldRenumberSequentially() {
    let content = "7\n00:00:01,000 --> 00:00:02,000\nOnly block\n";
    let blocks = parse_srt_blocks(content);
    let rebuilt = build_srt_content(&blocks);

    assert!(rebuilt.starts_with("1\n00:00:01,000 --> 00:00:02,000\nOnly block"));
    assert!(rebuilt.ends_with('\n'));
    assert!(!rebuilt.ends_with("\n\n"));
}

/// Test the whole-document helper
#[test]
fn test_adjust_srt_content_withOffset_shouldRoundTrip() {
    let (adjusted, count) = adjust_srt_content(SRT_SAMPLE, &global_only(250)).unwrap();

    assert_eq!(count, 3);
    assert!(adjusted.contains("00:00:01,250 --> 00:00:03,250"));
    assert!(adjusted.contains("00:00:10,250 --> 00:00:12,250"));

    // Re-parsing the rebuilt content recovers the same blocks
    let reparsed = parse_srt_blocks(&adjusted);
    assert_eq!(reparsed.len(), 3);
    assert_eq!(reparsed[1].text, "Sponsor message here");
}
