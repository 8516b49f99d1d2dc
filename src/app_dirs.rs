use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application path resolution
pub struct AppDirs;

impl AppDirs {
    /// Default config location, falling back to the working directory when
    /// the platform dirs cannot be resolved.
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "ghosttype")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("ghosttype_config.json"))
    }
}
