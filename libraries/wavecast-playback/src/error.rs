//! Error types for playlist playback

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Playback errors, named after the step that failed
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Opening the audio output failed
    #[error("engine init failed: {0}")]
    Init(String),

    /// A playlist entry could not be queued
    #[error("failed to queue {path}: {detail}")]
    Media { path: PathBuf, detail: String },

    /// Playback started but did not finish cleanly
    #[error("playback failed: {0}")]
    Playback(String),

    /// The list did not finish within the configured wait
    #[error("playback did not finish within {0:?}")]
    Timeout(Duration),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
