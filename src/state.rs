use crate::config::ToastConfig;
use crate::models::PreviewData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub pkg_dir: PathBuf,
    pub config: Arc<ToastConfig>,
    pub data: Arc<Mutex<PreviewData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, pkg_dir: PathBuf, data: PreviewData) -> Self {
        Self {
            data_path,
            pkg_dir,
            config: Arc::new(ToastConfig::default()),
            data: Arc::new(Mutex::new(data)),
        }
    }
}
