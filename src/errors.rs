/*!
 * Error types for the bisub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur during subtitle parsing and fusion
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Error when a timestamp cannot be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Error when no parser produced any events for a file
    #[error("No subtitle events found in: {0}")]
    NoEvents(String),
}

/// Errors that can occur during SRT sync adjustment
#[derive(Error, Debug)]
pub enum SyncError {
    /// Error when an SRT file contains no parseable blocks
    #[error("No SRT blocks found in: {0}")]
    NoBlocks(String),

    /// Error when a time range line is malformed
    #[error("Malformed time range: {0}")]
    MalformedTimeRange(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from sync adjustment
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
