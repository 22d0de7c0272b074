//! Wavecast Server Library
//!
//! Indexes a media directory into a playlist and dispatches it to one of
//! two streaming backends: an external ffmpeg restream against a signed
//! ingest URL, or the embedded sequential player.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod jobs;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use jobs::{Backend, DispatchTicket, StreamDispatcher, StreamRequest};
pub use services::RestreamService;
pub use state::AppState;
