use crate::models::EmbeddedData;
use std::{path::PathBuf, sync::Arc};

/// Stats are read once at startup and never refetched.
#[derive(Clone)]
pub struct AppState {
    pub stats_path: PathBuf,
    pub stats: Arc<EmbeddedData>,
}

impl AppState {
    pub fn new(stats_path: PathBuf, stats: EmbeddedData) -> Self {
        Self {
            stats_path,
            stats: Arc::new(stats),
        }
    }
}
