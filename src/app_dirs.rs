use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Default location of the log file; the terminal itself is owned by the UI.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("dwell-hangman");
            Some(state_dir.join("dwell-hangman.log"))
        } else {
            ProjectDirs::from("", "", "dwell-hangman")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("dwell-hangman.log"))
        }
    }
}
