// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds argument parsing and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod dwell;
pub mod error;
pub mod game;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod targets;
pub mod ui;
pub mod viewport;
pub mod words;

pub use app::App;
