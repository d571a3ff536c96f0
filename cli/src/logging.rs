use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::paths::get_log_dir;

const DEFAULT_FILTER: &str = "offline_mirror=info,offline_mirror_core=info";
const VERBOSE_FILTER: &str = "offline_mirror=debug,offline_mirror_core=debug";

/// Initialize logging for a mirror run
///
/// Logs go to stderr and to a daily-rotated file in the log directory
/// (`offline-mirror.log.YYYY-MM-DD`):
/// - XDG_DATA_HOME/offline-mirror/logs/ on Unix (typically ~/.local/share/offline-mirror/logs/)
/// - ~/Library/Application Support/offline-mirror/logs/ on macOS
/// - {FOLDERID_LocalAppData}/offline-mirror/logs/ on Windows
///
/// RUST_LOG overrides the level, e.g. `RUST_LOG=offline_mirror_core=debug`.
/// Without it, `verbose` switches from info to debug.
pub fn init(verbose: bool) -> Result<()> {
    let log_dir = get_log_dir()?;

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "offline-mirror.log");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!("Logging initialized to {}", log_dir.display());

    Ok(())
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}
