use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "kanatype";

/// Where kanatype keeps its files
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("kanatype_config.json"))
    }

    /// Default directory for `--log-file` names given without a directory.
    pub fn log_dir() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
