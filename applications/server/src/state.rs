/// Shared application state
use crate::jobs::StreamDispatcher;
use crate::services::RestreamService;
use std::sync::Arc;
use wavecast_playlist::PlaylistStore;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PlaylistStore>,
    pub restream: Arc<RestreamService>,
    pub dispatcher: Arc<StreamDispatcher>,
}

impl AppState {
    pub fn new(
        store: Arc<PlaylistStore>,
        restream: Arc<RestreamService>,
        dispatcher: Arc<StreamDispatcher>,
    ) -> Self {
        Self {
            store,
            restream,
            dispatcher,
        }
    }
}
