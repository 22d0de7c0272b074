//! Wavecast Embedded Playback
//!
//! Plays the checked entries of a playlist sequentially on the default
//! audio output, headless. One playback session per call, one completion
//! signal per finished list.
//!
//! The engine work runs on a dedicated thread that owns the output stream
//! and the sink; the caller blocks on a one-shot completion channel with an
//! optional timeout.

mod error;

pub mod player;

pub use error::PlaybackError;
pub use player::ListPlayer;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, PlaybackError>;
