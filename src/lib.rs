// glance-panel library - public API

// Re-export error types
pub mod error;
pub use error::{FetchError, FieldMissing, PanelError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;
pub mod web;

// Re-export commonly used types
pub use core::config::Settings;

// Initialize logging
pub fn init_logging() {
    // The logger itself keeps debug records; the global max level decides
    // whether they pass, so `apply_debug_mode` can toggle them later.
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
    log::set_max_level(log::LevelFilter::Info);
}

/// Initialize logging into a file so it does not tear the terminal panel.
///
/// Falls back to stderr when the file cannot be opened.
pub fn init_file_logging(path: &std::path::Path) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(log::LevelFilter::Debug);

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    let _ = builder.try_init();
    log::set_max_level(log::LevelFilter::Info);
}

/// Raise or lower verbosity at runtime from the persisted debug flag.
pub fn apply_debug_mode(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    log::set_max_level(level);
}
