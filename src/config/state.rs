// Application state module
// Read-only state shared by every connection

use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state
///
/// Holds only the startup configuration; nothing here changes while serving.
pub struct AppState {
    pub config: Config,
    templates_dir: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let templates_dir = PathBuf::from(&config.templates.dir);
        Self {
            config,
            templates_dir,
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }
}
