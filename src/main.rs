// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::sync_adjuster::SyncAdjustment;

mod app_config;
mod app_controller;
mod ass_writer;
mod errors;
mod file_utils;
mod format_parsers;
mod payload_fuser;
mod segment_builder;
mod subtitle_event;
mod sync_adjuster;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge Korean and Japanese subtitles into bilingual ASS files
    #[command(alias = "fuse")]
    Merge(MergeArgs),

    /// Shift SRT subtitle timing, optionally around a marker phrase
    Sync(SyncArgs),

    /// Generate shell completions for bisub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Video file or directory; output .ass lands next to each video
    #[arg(value_name = "VIDEO_PATH")]
    video_path: PathBuf,

    /// Korean subtitle file or directory (ASS/SRT/SMI, mixed formats allowed)
    #[arg(short, long, value_name = "KOREAN_PATH")]
    korean: PathBuf,

    /// Japanese subtitle file or directory (ASS/SRT/SMI, mixed formats allowed)
    #[arg(short, long, value_name = "JAPANESE_PATH")]
    japanese: PathBuf,

    /// Font size for the Korean (upper) line
    #[arg(long)]
    korean_font_size: Option<u32>,

    /// Font size for the Japanese (lower) line
    #[arg(long)]
    japanese_font_size: Option<u32>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// SRT file or directory to adjust in place
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Global offset applied to every block, in milliseconds (may be negative)
    #[arg(short, long, value_name = "OFFSET_MS", allow_hyphen_values = true)]
    offset: i64,

    /// Marker phrase; from its first occurrence onward the post offset applies
    #[arg(short, long)]
    marker: Option<String>,

    /// Offset replacing the global one at and after the marker, in milliseconds
    #[arg(
        short,
        long,
        value_name = "OFFSET_MS",
        allow_hyphen_values = true,
        requires = "marker"
    )]
    post_offset: Option<i64>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// bisub - Bilingual Subtitle Fuser
///
/// Merges Korean and Japanese subtitle tracks into a single bilingual ASS file
/// per video, and shifts SRT timing around a marker phrase.
#[derive(Parser, Debug)]
#[command(name = "bisub")]
#[command(version = "1.0.0")]
#[command(about = "Korean/Japanese bilingual subtitle fuser")]
#[command(long_about = "bisub matches videos with Korean and Japanese subtitle files by natural
filename order and fuses each pair into one gap-free, overlap-free ASS track.

EXAMPLES:
    bisub merge ./videos -k ./korean -j ./japanese    # Batch merge a season
    bisub merge ep1.mkv -k ep1.smi -j ep1.ass         # Merge a single episode
    bisub merge ./videos -k ./kr -j ./jp -f           # Force overwrite outputs
    bisub merge ./videos -k ./kr -j ./jp --japanese-font-size 110
    bisub sync ./subs -o 1500                         # Delay all blocks 1.5s
    bisub sync ep1.srt -o 0 -m \"sponsor\" -p -3000     # Re-sync after a marker
    bisub completions bash > bisub.bash               # Generate completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "bisub", &mut std::io::stdout());
            Ok(())
        }
        Commands::Merge(args) => run_merge(args),
        Commands::Sync(args) => run_sync(args),
    }
}

fn run_merge(options: MergeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save_to_file(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(korean_font_size) = options.korean_font_size {
        config.korean_font_size = korean_font_size;
    }
    if let Some(japanese_font_size) = options.japanese_font_size {
        config.japanese_font_size = japanese_font_size;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;
    controller.run_merge(
        &options.video_path,
        &options.korean,
        &options.japanese,
        options.force_overwrite,
    )?;

    Ok(())
}

fn run_sync(options: SyncArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let adjustment = SyncAdjustment {
        global_offset_ms: options.offset,
        marker: options.marker,
        post_marker_offset_ms: options.post_offset,
    };

    let controller = Controller::with_config(Config::default())?;
    controller.run_sync(&options.input_path, &adjustment)?;

    Ok(())
}
