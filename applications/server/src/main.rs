/// Wavecast Server - playlist indexing and restream dispatch
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;
use wavecast_playlist::{PlaylistItem, PlaylistStore, Scanner};
use wavecast_server::{
    config::ServerConfig,
    jobs::{StreamDispatcher, StreamRequest},
    services::RestreamService,
    state::AppState,
};

#[derive(Parser)]
#[command(name = "wavecast-server")]
#[command(about = "Index a media directory and stream it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the media directory and print a playlist summary
    Scan {
        /// Directory to scan instead of the configured media directory
        path: Option<PathBuf>,
    },
    /// Restream a single file through the external transcoder
    Play {
        /// File to restream
        file: PathBuf,
    },
    /// Scan the media directory and play the playlist on the embedded engine
    Stream {
        /// Directory to scan instead of the configured media directory
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wavecast_server=info,wavecast_playlist=info,wavecast_playback=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load()?;

    match cli.command {
        Commands::Scan { path } => scan(&config, path)?,
        Commands::Play { file } => play(&config, file).await?,
        Commands::Stream { path } => stream(&config, path).await?,
    }

    Ok(())
}

fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    config.validate()?;

    let base_url = Url::parse(&config.streamer.base_url)?;
    let store = Arc::new(PlaylistStore::new());
    let restream = Arc::new(RestreamService::new(
        config.streamer.ffmpeg_path.clone(),
        base_url,
        config.streamer.master_key.clone(),
    ));
    let dispatcher = Arc::new(StreamDispatcher::new(
        Arc::clone(&store),
        Arc::clone(&restream),
        config.playback.wait_timeout(),
    ));

    Ok(AppState::new(store, restream, dispatcher))
}

fn scan_into(config: &ServerConfig, path: Option<PathBuf>) -> anyhow::Result<Vec<PlaylistItem>> {
    let root = path.unwrap_or_else(|| config.media.directory.clone());
    tracing::info!("scanning media directory {}", root.display());

    let scanner = Scanner::new().follow_links(config.media.follow_links);
    let items = scanner.scan(&root)?;

    tracing::info!("{} entries found below {}", items.len(), root.display());
    for (i, item) in items.iter().enumerate() {
        tracing::debug!(
            "{}: {} ({} bytes, cover: {:?})",
            i,
            item.path.display(),
            item.size_bytes,
            item.cover
        );
    }

    Ok(items)
}

fn scan(config: &ServerConfig, path: Option<PathBuf>) -> anyhow::Result<()> {
    scan_into(config, path)?;
    Ok(())
}

async fn play(config: &ServerConfig, file: PathBuf) -> anyhow::Result<()> {
    let state = build_state(config)?;

    let ticket = state.dispatcher.dispatch(StreamRequest::Restream(file))?;
    tracing::info!("restream started");

    // The CLI has nothing better to do than observe the outcome.
    ticket.handle.await?;
    Ok(())
}

async fn stream(config: &ServerConfig, path: Option<PathBuf>) -> anyhow::Result<()> {
    let state = build_state(config)?;

    let items = scan_into(config, path)?;
    state.store.replace(items);

    let ticket = state.dispatcher.dispatch(StreamRequest::Playlist)?;
    tracing::info!("playlist playback started");

    ticket.handle.await?;
    Ok(())
}
