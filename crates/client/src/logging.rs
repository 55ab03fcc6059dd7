//! Tracing setup for the client binary.

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber: human-readable stderr output plus a
/// per-session log file under `log_dir/<session>/hunter.log`.
///
/// `RUST_LOG` narrows or widens the default INFO level.
pub fn setup_logging(log_dir: &Path, session: &str) -> Result<()> {
    let session_log_dir = log_dir.join(session);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "hunter.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!(session, "Logging initialized");
    tracing::info!("Log file: {}/hunter.log", session_log_dir.display());

    Ok(())
}
