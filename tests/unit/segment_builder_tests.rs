/*!
 * Tests for cut-point segmentation of two language tracks
 */

use bisub::subtitle_event::SubtitleEvent;
use bisub::segment_builder::build_segments;

fn event(start_ms: u64, end_ms: u64, text: &str) -> SubtitleEvent {
    SubtitleEvent::new(start_ms, end_ms, text.to_string())
}

/// Test the canonical two-track example: KO (1000, 3000), JP (2000, 4000)
#[test]
fn test_build_segments_withOverlappingTracks_shouldCutAtAllBoundaries() {
    let korean = vec![event(1000, 3000, "안녕")];
    let japanese = vec![event(2000, 4000, "こんにちは")];

    let segments = build_segments(&korean, &japanese);

    assert_eq!(segments.len(), 3);

    assert_eq!((segments[0].start_ms, segments[0].end_ms), (1000, 2000));
    assert_eq!(segments[0].korean, Some(vec!["안녕".to_string()]));
    assert_eq!(segments[0].japanese, None);

    assert_eq!((segments[1].start_ms, segments[1].end_ms), (2000, 3000));
    assert_eq!(segments[1].korean, Some(vec!["안녕".to_string()]));
    assert_eq!(segments[1].japanese, Some(vec!["こんにちは".to_string()]));

    assert_eq!((segments[2].start_ms, segments[2].end_ms), (3000, 4000));
    assert_eq!(segments[2].korean, None);
    assert_eq!(segments[2].japanese, Some(vec!["こんにちは".to_string()]));
}

/// Test that segments exactly cover [min start, max end) with no gaps
#[test]
fn test_build_segments_withTwoTracks_shouldCoverWholeSpanWithoutGaps() {
    let korean = vec![event(500, 2500, "a"), event(4000, 6000, "b")];
    let japanese = vec![event(1000, 3000, "x"), event(5000, 7000, "y")];

    let segments = build_segments(&korean, &japanese);

    assert_eq!(segments.first().unwrap().start_ms, 500);
    assert_eq!(segments.last().unwrap().end_ms, 7000);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end_ms, pair[1].start_ms, "gap between segments");
    }
}

/// Test that the later-starting cue always wins within one language
#[test]
fn test_build_segments_withNestedSameLanguageCues_shouldPickLatestStart() {
    let korean = vec![event(1000, 5000, "earlier"), event(2000, 4000, "later")];

    let segments = build_segments(&korean, &[]);

    // [2000, 4000) overlaps both cues; only the later-starting one survives
    let middle = segments
        .iter()
        .find(|segment| segment.start_ms == 2000)
        .unwrap();
    assert_eq!(middle.korean, Some(vec!["later".to_string()]));

    // Outside the nested cue the earlier one is active again
    let tail = segments
        .iter()
        .find(|segment| segment.start_ms == 4000)
        .unwrap();
    assert_eq!(tail.korean, Some(vec!["earlier".to_string()]));
}

/// Test consecutive identical line deduplication
#[test]
fn test_build_segments_withRepeatedLines_shouldDedupConsecutive() {
    let korean = vec![event(0, 1000, "같은 줄\n같은 줄\n다른 줄")];

    let segments = build_segments(&korean, &[]);

    assert_eq!(
        segments[0].korean,
        Some(vec!["같은 줄".to_string(), "다른 줄".to_string()])
    );
}

/// Test that whitespace-only lines never survive into a segment
#[test]
fn test_build_segments_withWhitespaceLines_shouldDropThem() {
    let korean = vec![event(0, 1000, "  \n줄  \n   ")];

    let segments = build_segments(&korean, &[]);

    assert_eq!(segments[0].korean, Some(vec!["줄".to_string()]));
}

/// Test both tracks empty
#[test]
fn test_build_segments_withEmptyTracks_shouldReturnNoSegments() {
    assert!(build_segments(&[], &[]).is_empty());
}

/// Test one empty track
#[test]
fn test_build_segments_withOneEmptyTrack_shouldStillSegmentTheOther() {
    let japanese = vec![event(100, 900, "のみ")];
    let segments = build_segments(&[], &japanese);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].korean, None);
    assert_eq!(segments[0].japanese, Some(vec!["のみ".to_string()]));
}
