use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

/// Sends `tracing` output to `path`, appending.
///
/// Returns an error if the file cannot be opened or a global subscriber is
/// already installed.
pub fn init_file_logging(path: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    Ok(())
}

/// Discards everything; used when no log file can be resolved.
pub fn init_silent() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::sink)
        .with_max_level(Level::ERROR)
        .try_init();
}
