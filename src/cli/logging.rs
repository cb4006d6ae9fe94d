//! Logging initialization

use std::path::PathBuf;

/// Initialize logging based on debug flag
///
/// Logs go to a temp file so the TUI keeps the terminal to itself. Returns
/// the log file path if debug logging is enabled.
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if !debug {
        return None;
    }

    let temp_file = tempfile::Builder::new()
        .prefix("helmdeck-")
        .suffix(".log")
        .tempfile()
        .and_then(|f| f.keep().map_err(|e| e.error))
        .map(|(_, path)| path)
        .unwrap_or_else(|_| {
            std::env::temp_dir().join(format!("helmdeck-{}.log", std::process::id()))
        });

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&temp_file)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Could not open log file {}: {}", temp_file.display(), e);
            return None;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("helmdeck=debug")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(temp_file)
}
