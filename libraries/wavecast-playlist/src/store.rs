//! Process-wide playlist state

use crate::types::PlaylistItem;
use parking_lot::RwLock;
use std::sync::Arc;

/// Holds the current playlist, replaced wholesale by each scan.
///
/// Readers take an `Arc` snapshot, so a replace never invalidates a
/// playlist a playback task is still iterating. The store lives as long as
/// the process; there is no explicit destruction path.
#[derive(Debug, Default)]
pub struct PlaylistStore {
    current: RwLock<Arc<Vec<PlaylistItem>>>,
}

impl PlaylistStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current playlist.
    pub fn snapshot(&self) -> Arc<Vec<PlaylistItem>> {
        Arc::clone(&self.current.read())
    }

    /// Replace the current playlist wholesale.
    pub fn replace(&self, items: Vec<PlaylistItem>) {
        *self.current.write() = Arc::new(items);
    }

    /// Number of entries in the current playlist.
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// Whether the current playlist has no entries.
    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}
