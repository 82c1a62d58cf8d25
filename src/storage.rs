use crate::errors::AppError;
use crate::models::PreviewData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> PathBuf {
    env::var("APP_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/state.json"))
}

/// Directory holding the wasm-bindgen output served under `/pkg/`.
pub fn resolve_pkg_dir() -> PathBuf {
    env::var("PKG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("pkg"))
}

pub async fn load_data(path: &Path) -> PreviewData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                PreviewData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => PreviewData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            PreviewData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &PreviewData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    Ok(())
}
