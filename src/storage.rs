use crate::models::EmbeddedData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_stats_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_STATS_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/stats.json"))
}

/// Missing, unreadable and malformed files all yield empty stats, so every
/// chart degrades to a no-op instead of failing the page.
pub async fn load_stats(path: &Path) -> EmbeddedData {
    match fs::read_to_string(path).await {
        Ok(raw) => match EmbeddedData::from_json(&raw) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse stats file: {err}");
                EmbeddedData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => EmbeddedData::default(),
        Err(err) => {
            error!("failed to read stats file: {err}");
            EmbeddedData::default()
        }
    }
}
