use anyhow::Result;
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::ass_writer;
use crate::file_utils::FileManager;
use crate::format_parsers;
use crate::payload_fuser::{self, LineStyle};
use crate::segment_builder;
use crate::sync_adjuster::{self, SyncAdjustment};

// @module: Application controller for batch subtitle fusion and sync adjustment

/// Video containers looked up in merge mode
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mkv", "mov", "avi", "wmv"];

/// Subtitle files looked up in merge mode; txt goes through format fallback
const SUBTITLE_EXTENSIONS: [&str; 6] = ["ass", "ssa", "srt", "smi", "sami", "txt"];

/// Main application controller for subtitle fusion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

/// Outcome of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of items converted successfully
    pub done: usize,
    /// Number of items skipped because the output already exists
    pub skipped: usize,
    /// Failures recorded with the originating filename
    pub errors: Vec<String>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the merge workflow: match videos with Korean and Japanese subtitle
    /// files by natural sort order and convert each triple to a bilingual ASS
    /// next to the video.
    ///
    /// Per-item failures are recorded and do not halt the remaining batch.
    pub fn run_merge(
        &self,
        video_path: &Path,
        korean_path: &Path,
        japanese_path: &Path,
        force_overwrite: bool,
    ) -> Result<BatchReport> {
        let videos = FileManager::collect_files(video_path, &VIDEO_EXTENSIONS)?;
        let koreans = FileManager::collect_files(korean_path, &SUBTITLE_EXTENSIONS)?;
        let japaneses = FileManager::collect_files(japanese_path, &SUBTITLE_EXTENSIONS)?;

        let count = videos.len().min(koreans.len()).min(japaneses.len());
        if count == 0 {
            return Err(anyhow::anyhow!(
                "Nothing to match: {} video(s), {} Korean subtitle(s), {} Japanese subtitle(s)",
                videos.len(),
                koreans.len(),
                japaneses.len()
            ));
        }
        if !(videos.len() == koreans.len() && koreans.len() == japaneses.len()) {
            warn!(
                "File counts differ ({} videos, {} Korean, {} Japanese); processing the first {} triple(s)",
                videos.len(),
                koreans.len(),
                japaneses.len(),
                count
            );
        }

        let progress_bar = ProgressBar::new(count as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Merging subtitles");

        let mut report = BatchReport::default();
        for i in 0..count {
            let video = &videos[i];
            let file_name = video
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress_bar.set_message(format!("Processing: {}", file_name));

            let output_path = video.with_extension("ass");
            if output_path.exists() && !force_overwrite {
                warn!("Skipping {}, output already exists (use -f to force overwrite)", file_name);
                report.skipped += 1;
                progress_bar.inc(1);
                continue;
            }

            match self.convert_triple(&koreans[i], &japaneses[i], &output_path) {
                Ok(line_count) => {
                    debug!("Wrote {} dialogue lines to {:?}", line_count, output_path);
                    report.done += 1;
                }
                Err(e) => {
                    error!("Error processing {}: {}", file_name, e);
                    report.errors.push(format!("{}: {}", file_name, e));
                }
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_with_message("Merge complete");

        info!(
            "Merge completed: {} converted, {} skipped, {} error(s)",
            report.done,
            report.skipped,
            report.errors.len()
        );
        for message in report.errors.iter().take(10) {
            warn!("  {}", message);
        }
        if report.errors.len() > 10 {
            warn!("  ... and {} more", report.errors.len() - 10);
        }

        Ok(report)
    }

    /// Convert one Korean/Japanese subtitle pair into a fused ASS file
    fn convert_triple(
        &self,
        korean_file: &Path,
        japanese_file: &Path,
        output_path: &Path,
    ) -> Result<usize> {
        let korean_events = Self::load_track(korean_file)?;
        let japanese_events = Self::load_track(japanese_file)?;

        let segments = segment_builder::build_segments(&korean_events, &japanese_events);
        let style = LineStyle {
            korean_font: self.config.korean_font.clone(),
            japanese_font: self.config.japanese_font.clone(),
            korean_font_size: self.config.korean_font_size,
            japanese_font_size: self.config.japanese_font_size,
        };
        let fused = payload_fuser::fuse_segments(&segments, &style);

        ass_writer::write_ass(output_path, &fused)?;
        Ok(fused.len())
    }

    /// Read and parse one subtitle file into a normalized event list.
    ///
    /// An unparseable file yields an empty track, not an error; the other
    /// language still produces output on its own.
    fn load_track(path: &Path) -> Result<Vec<crate::subtitle_event::SubtitleEvent>> {
        let text = FileManager::read_text_auto(path)?;
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();

        let events = format_parsers::load_events(&text, &extension);
        if events.is_empty() {
            warn!("No events parsed from {:?}", path);
        }
        Ok(events)
    }

    /// Run the sync workflow: shift every SRT file under the input path in place
    pub fn run_sync(&self, input_path: &Path, adjustment: &SyncAdjustment) -> Result<BatchReport> {
        let srt_files = FileManager::collect_files(input_path, &["srt"])?;
        if srt_files.is_empty() {
            return Err(anyhow::anyhow!("No SRT files found under: {:?}", input_path));
        }

        let mut report = BatchReport::default();
        for srt_file in &srt_files {
            let file_name = srt_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            match Self::adjust_file(srt_file, adjustment) {
                Ok(block_count) => {
                    info!("Adjusted {} ({} blocks)", file_name, block_count);
                    report.done += 1;
                }
                Err(e) => {
                    error!("Error adjusting {}: {}", file_name, e);
                    report.errors.push(format!("{}: {}", file_name, e));
                }
            }
        }

        info!(
            "Sync completed: {} adjusted, {} error(s)",
            report.done,
            report.errors.len()
        );
        Ok(report)
    }

    /// Shift one SRT file in place
    fn adjust_file(path: &PathBuf, adjustment: &SyncAdjustment) -> Result<usize> {
        let content = FileManager::read_text_auto(path)?;
        let (adjusted, block_count) = sync_adjuster::adjust_srt_content(&content, adjustment)?;
        FileManager::write_to_file(path, &adjusted)?;
        Ok(block_count)
    }
}
