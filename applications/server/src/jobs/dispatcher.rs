/// Stream dispatcher - wires the current playlist to a backend
use crate::error::{Result, ServerError};
use crate::services::RestreamService;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use wavecast_playback::ListPlayer;
use wavecast_playlist::PlaylistStore;

/// Which backend a stream request selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamRequest {
    /// Play the current playlist on the embedded engine.
    Playlist,
    /// Restream a single file through the external transcoder.
    Restream(PathBuf),
}

/// Backend recorded on a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Native,
    Subprocess,
}

/// Receipt for a launched stream.
///
/// The caller's "started" response never implies completion; awaiting the
/// handle is the only way to observe the outcome directly, otherwise it is
/// log-only.
#[derive(Debug)]
pub struct DispatchTicket {
    pub backend: Backend,
    pub handle: JoinHandle<()>,
}

pub struct StreamDispatcher {
    store: Arc<PlaylistStore>,
    restream: Arc<RestreamService>,
    wait_timeout: Option<Duration>,
}

impl StreamDispatcher {
    pub fn new(
        store: Arc<PlaylistStore>,
        restream: Arc<RestreamService>,
        wait_timeout: Option<Duration>,
    ) -> Self {
        Self {
            store,
            restream,
            wait_timeout,
        }
    }

    /// Validate and launch a stream request off the caller's path.
    ///
    /// Anything detectable before the backend starts is returned here;
    /// everything later is only observable in logs or via the ticket.
    pub fn dispatch(&self, request: StreamRequest) -> Result<DispatchTicket> {
        match request {
            StreamRequest::Playlist => self.dispatch_playlist(),
            StreamRequest::Restream(file) => self.dispatch_restream(&file),
        }
    }

    fn dispatch_playlist(&self) -> Result<DispatchTicket> {
        // Copy-on-dispatch: the playback task iterates its own snapshot, so
        // a concurrent rescan cannot race it.
        let snapshot = self.store.snapshot();
        if snapshot.is_empty() {
            return Err(ServerError::EmptyPlaylist);
        }

        let player = ListPlayer::new().wait_timeout(self.wait_timeout);
        let handle = tokio::task::spawn_blocking(move || match player.play(&snapshot) {
            Ok(played) => {
                tracing::info!("playlist playback finished after {} entries", played);
            }
            Err(e) => {
                tracing::error!("playlist playback failed: {}", e);
            }
        });

        Ok(DispatchTicket {
            backend: Backend::Native,
            handle,
        })
    }

    fn dispatch_restream(&self, file: &Path) -> Result<DispatchTicket> {
        let handle = self.restream.start(file)?;
        Ok(DispatchTicket {
            backend: Backend::Subprocess,
            handle,
        })
    }
}
