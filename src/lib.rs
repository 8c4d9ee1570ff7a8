/*!
 * # bisub - Bilingual Subtitle Fuser
 *
 * A Rust library and CLI for merging Korean and Japanese subtitle tracks into
 * a single bilingual ASS file, plus a standalone SRT time-shift utility.
 *
 * ## Features
 *
 * - Parse ASS/SSA, SRT, and SMI subtitle files (mixed formats per batch)
 * - Encoding auto-detection over common Korean/Japanese encodings
 * - Merge two independently-timed tracks into one gap-free, overlap-free
 *   single-track ASS with per-line font/size overrides
 * - Non-rendering `{!KR}` / `{!JP}` markers for playback-time language
 *   detection (e.g. an mpv Lua script)
 * - Batch processing matched by natural filename order
 * - SRT sync shifting with an optional marker-phrase pivot
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_event`: Event type, timestamp conversion, end-time normalization
 * - `format_parsers`: Per-format parsers and dispatch
 * - `segment_builder`: Cut-point segmentation of two language tracks
 * - `payload_fuser`: Styled payload construction and final fixing passes
 * - `ass_writer`: ASS container serialization
 * - `sync_adjuster`: Standalone SRT time-shift utility
 * - `file_utils`: File system operations and encoding detection
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod ass_writer;
pub mod errors;
pub mod file_utils;
pub mod format_parsers;
pub mod payload_fuser;
pub mod segment_builder;
pub mod subtitle_event;
pub mod sync_adjuster;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use format_parsers::{SubtitleFormat, load_events};
pub use payload_fuser::{FusedLine, LineStyle, fuse_segments};
pub use segment_builder::{Segment, build_segments};
pub use subtitle_event::{SubtitleEvent, normalize_events};
pub use sync_adjuster::{SrtBlock, SyncAdjustment};
pub use errors::{AppError, SubtitleError, SyncError};
