/// Server error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("empty playlist")]
    EmptyPlaylist,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Restream error: {0}")]
    Restream(String),

    #[error("Scan error: {0}")]
    Scan(#[from] wavecast_playlist::ScanError),

    #[error("Playback error: {0}")]
    Playback(#[from] wavecast_playback::PlaybackError),

    #[error("Invalid ingest URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
