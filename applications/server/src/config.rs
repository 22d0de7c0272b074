/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_media")]
    pub media: MediaSettings,

    #[serde(default = "default_streamer")]
    pub streamer: StreamerSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaSettings {
    #[serde(default = "default_media_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_follow_links")]
    pub follow_links: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamerSettings {
    /// Ingest endpoint the external transcoder streams to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Shared key covered by the signing digest. Environment-sourced.
    #[serde(default)]
    pub master_key: String,

    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Upper bound on waiting for the playlist to finish, in seconds.
    /// Unset waits indefinitely, which suits long-running streams.
    #[serde(default)]
    pub wait_timeout_secs: Option<u64>,
}

impl PlaybackSettings {
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_secs.map(Duration::from_secs)
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with WAVECAST_)
        settings = settings.add_source(
            config::Environment::with_prefix("WAVECAST")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.streamer.master_key.is_empty() {
            return Err(ServerError::Config(
                "Master key is required (set WAVECAST_STREAMER_MASTER_KEY)".to_string(),
            ));
        }

        Url::parse(&self.streamer.base_url).map_err(|e| {
            ServerError::Config(format!(
                "Invalid streamer base URL {:?}: {}",
                self.streamer.base_url, e
            ))
        })?;

        Ok(())
    }
}

// Default values
fn default_media() -> MediaSettings {
    MediaSettings {
        directory: default_media_directory(),
        follow_links: default_follow_links(),
    }
}

fn default_media_directory() -> PathBuf {
    PathBuf::from("./media")
}

fn default_follow_links() -> bool {
    true
}

fn default_streamer() -> StreamerSettings {
    StreamerSettings {
        base_url: default_base_url(),
        master_key: String::new(),
        ffmpeg_path: default_ffmpeg_path(),
    }
}

fn default_base_url() -> String {
    "rtmp://127.0.0.1:1935/live/".to_string()
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("/usr/bin/ffmpeg")
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        wait_timeout_secs: None,
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            media: default_media(),
            streamer: default_streamer(),
            playback: default_playback(),
        }
    }
}
