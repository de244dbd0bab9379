//! Tracing subscriber setup for the binary.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Send log output to stderr so reports on stdout stay clean. Warnings
/// only by default, everything down to debug with `--debug`.
pub fn initialize_logging(debug: bool) -> Result<(), String> {
    let level = if debug { Level::DEBUG } else { Level::WARN };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
