//! Sequential list playback on the default audio output

use crate::{PlaybackError, Result};
use rodio::{Decoder, OutputStreamBuilder, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use wavecast_playlist::PlaylistItem;

/// Interval for drain checks on the playing sink
const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Plays the checked entries of a playlist in order, blocking the caller
/// until the list finishes.
///
/// The output stream and the sink live on a dedicated thread; completion
/// comes back over a one-shot channel. A session is torn down on every exit
/// path: the sink is stopped and released before the output stream.
pub struct ListPlayer {
    /// Upper bound on waiting for the list to finish. Unset means wait
    /// indefinitely, which suits long-running streams.
    wait_timeout: Option<Duration>,
}

impl Default for ListPlayer {
    fn default() -> Self {
        Self { wait_timeout: None }
    }
}

impl ListPlayer {
    /// Create a player that waits indefinitely for the list to finish
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an upper bound on the completion wait
    pub fn wait_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Play every checked item of `items` in order.
    ///
    /// Unchecked items are skipped, not queued. Returns the number of
    /// entries handed to the engine once they have all finished playing.
    /// Errors name the failing step; a queueing failure names the entry.
    pub fn play(&self, items: &[PlaylistItem]) -> Result<usize> {
        let paths = select_checked(items);
        if paths.is_empty() {
            tracing::debug!("no checked entries to play");
            return Ok(0);
        }

        let stop = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = mpsc::channel();

        let worker_stop = Arc::clone(&stop);
        thread::Builder::new()
            .name("wavecast-playback".into())
            .spawn(move || {
                let result = run_session(paths, &worker_stop);
                // The receiver is gone if the caller timed out.
                let _ = done_tx.send(result);
            })?;

        match self.wait_timeout {
            Some(timeout) => match done_rx.recv_timeout(timeout) {
                Ok(result) => result,
                Err(RecvTimeoutError::Timeout) => {
                    stop.store(true, Ordering::Relaxed);
                    Err(PlaybackError::Timeout(timeout))
                }
                Err(RecvTimeoutError::Disconnected) => Err(worker_died()),
            },
            None => done_rx.recv().unwrap_or_else(|_| Err(worker_died())),
        }
    }
}

/// Paths of the items selected for playback, in playlist order.
fn select_checked(items: &[PlaylistItem]) -> Vec<PathBuf> {
    items
        .iter()
        .filter(|item| item.checked)
        .map(|item| item.path.clone())
        .collect()
}

/// One playback session: init, queue, play, drain.
///
/// Owns the engine for its whole lifetime. Locals drop in reverse order, so
/// the session guard (sink) is released before the output stream on every
/// exit path.
fn run_session(paths: Vec<PathBuf>, stop: &AtomicBool) -> Result<usize> {
    let mut stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| PlaybackError::Init(e.to_string()))?;
    // rodio logs to stderr when the stream is dropped; keep teardown quiet.
    stream.log_on_drop(false);

    let session = SessionGuard {
        sink: Sink::connect_new(stream.mixer()),
    };

    for path in &paths {
        let file = File::open(path).map_err(|e| PlaybackError::Media {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Media {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        session.sink.append(source);
    }

    tracing::debug!("queued {} entries for playback", paths.len());
    session.sink.play();

    loop {
        if session.sink.empty() {
            break;
        }
        if stop.load(Ordering::Relaxed) {
            return Err(PlaybackError::Playback("cancelled by caller".into()));
        }
        thread::sleep(TICK_INTERVAL);
    }

    tracing::debug!("list finished playing");
    Ok(paths.len())
}

fn worker_died() -> PlaybackError {
    PlaybackError::Playback("playback worker exited without signaling completion".into())
}

/// Stops the sink when the session scope ends, success or failure, so a
/// failed build never leaves audio playing detached.
struct SessionGuard {
    sink: Sink,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
