/*!
 * End-to-end tests for the merge and sync workflows
 */

use std::fs;
use anyhow::Result;
use bisub::app_config::Config;
use bisub::app_controller::Controller;
use bisub::sync_adjuster::SyncAdjustment;
use crate::common;

/// Test the full merge workflow with mixed subtitle formats
#[test]
fn test_run_merge_withMixedFormats_shouldWriteAssBesideVideo() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let videos = dir.join("videos");
    let korean = dir.join("korean");
    let japanese = dir.join("japanese");
    fs::create_dir_all(&videos)?;
    fs::create_dir_all(&korean)?;
    fs::create_dir_all(&japanese)?;

    common::create_test_file(&videos, "ep1.mkv", "")?;
    common::create_test_file(
        &korean,
        "ep1.smi",
        "<SAMI><BODY><SYNC Start=1000><P Class=KRCC>안녕하세요</BODY></SAMI>",
    )?;
    common::create_japanese_srt(&japanese, "ep1.srt")?;

    let controller = Controller::with_config(Config::default())?;
    let report = controller.run_merge(&videos, &korean, &japanese, false)?;

    assert_eq!(report.done, 1);
    assert!(report.errors.is_empty());

    let output = videos.join("ep1.ass");
    assert!(output.exists());

    let bytes = fs::read(&output)?;
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF], "output must carry a UTF-8 BOM");

    let content = String::from_utf8(bytes)?;
    assert!(content.contains("[Script Info]"));
    assert!(content.contains("{!KR}"));
    assert!(content.contains("{!JP}"));
    assert!(content.contains("안녕하세요"));
    assert!(content.contains("こんにちは"));
    Ok(())
}

/// Test that existing outputs are skipped without the force flag
#[test]
fn test_run_merge_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "ep1.mkv", "")?;
    common::create_test_file(&dir, "ep1.ass", "stale output")?;
    let korean = common::create_korean_srt(&dir, "kr.srt")?;
    let japanese = common::create_japanese_srt(&dir, "jp.srt")?;

    let video = dir.join("ep1.mkv");
    let controller = Controller::with_config(Config::default())?;

    let report = controller.run_merge(&video, &korean, &japanese, false)?;
    assert_eq!(report.skipped, 1);
    assert_eq!(report.done, 0);
    assert_eq!(fs::read_to_string(dir.join("ep1.ass"))?, "stale output");

    let report = controller.run_merge(&video, &korean, &japanese, true)?;
    assert_eq!(report.done, 1);
    assert!(fs::read_to_string(dir.join("ep1.ass"))?.contains("[Script Info]"));
    Ok(())
}

/// Test that mismatched counts process the shortest list
#[test]
fn test_run_merge_withMismatchedCounts_shouldProcessMinimum() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let videos = dir.join("videos");
    let korean = dir.join("korean");
    let japanese = dir.join("japanese");
    fs::create_dir_all(&videos)?;
    fs::create_dir_all(&korean)?;
    fs::create_dir_all(&japanese)?;

    common::create_test_file(&videos, "ep1.mkv", "")?;
    common::create_test_file(&videos, "ep2.mkv", "")?;
    common::create_korean_srt(&korean, "ep1.srt")?;
    common::create_korean_srt(&korean, "ep2.srt")?;
    common::create_japanese_srt(&japanese, "ep1.srt")?;

    let controller = Controller::with_config(Config::default())?;
    let report = controller.run_merge(&videos, &korean, &japanese, false)?;

    assert_eq!(report.done, 1);
    assert!(videos.join("ep1.ass").exists());
    assert!(!videos.join("ep2.ass").exists());
    Ok(())
}

/// Test that an unparseable track does not abort the batch: the other
/// language still produces output on its own
#[test]
fn test_run_merge_withUnparseableKoreanTrack_shouldStillEmitJapanese() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "ep1.mkv", "")?;
    let korean = common::create_test_file(&dir, "kr.txt", "nothing parseable in here")?;
    let japanese = common::create_japanese_srt(&dir, "jp.srt")?;

    let controller = Controller::with_config(Config::default())?;
    let report = controller.run_merge(&dir.join("ep1.mkv"), &korean, &japanese, false)?;

    assert_eq!(report.done, 1);
    let content = fs::read_to_string(dir.join("ep1.ass"))?;
    assert!(content.contains("{!JP}"));
    assert!(!content.contains("{!KR}"));
    Ok(())
}

/// Test the font size configuration flowing into payload overrides
#[test]
fn test_run_merge_withCustomFontSizes_shouldEmitThemInOverrides() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "ep1.mkv", "")?;
    let korean = common::create_korean_srt(&dir, "kr.srt")?;
    let japanese = common::create_japanese_srt(&dir, "jp.srt")?;

    let mut config = Config::default();
    config.korean_font_size = 33;
    config.japanese_font_size = 99;

    let controller = Controller::with_config(config)?;
    controller.run_merge(&dir.join("ep1.mkv"), &korean, &japanese, false)?;

    let content = fs::read_to_string(dir.join("ep1.ass"))?;
    assert!(content.contains(r"{\r\fnMalgun Gothic\fs33}"));
    assert!(content.contains(r"{\r\fnMeiryo\fs99}"));
    Ok(())
}

/// Test the sync workflow adjusting a directory of SRT files in place
#[test]
fn test_run_sync_withDirectory_shouldShiftFilesInPlace() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let file = common::create_korean_srt(&dir, "ep1.srt")?;
    common::create_test_file(&dir, "ignore.txt", "not an srt")?;

    let controller = Controller::with_config(Config::default())?;
    let adjustment = SyncAdjustment {
        global_offset_ms: 500,
        marker: None,
        post_marker_offset_ms: None,
    };
    let report = controller.run_sync(&dir, &adjustment)?;

    assert_eq!(report.done, 1);
    let content = fs::read_to_string(&file)?;
    assert!(content.contains("00:00:01,500 --> 00:00:03,500"));
    Ok(())
}

/// Test that a zero font size aborts before any batch work starts
#[test]
fn test_controller_withInvalidConfig_shouldRefuseToStart() {
    let mut config = Config::default();
    config.korean_font_size = 0;
    assert!(Controller::with_config(config).is_err());
}
