use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use zworkspace::kernel::services::adapters::ensure_log_dir;

const LOG_FILE: &str = "zworkspace.log";
const DEFAULT_FILTER: &str = "zworkspace=info";

/// Keeps the non-blocking writer alive; logs are flushed when it drops.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// App log dir, or a temp dir when the platform dir is unavailable.
fn resolve_log_dir() -> io::Result<PathBuf> {
    ensure_log_dir().or_else(|err| {
        let dir = std::env::temp_dir().join("zworkspace").join("logs");
        std::fs::create_dir_all(&dir)?;
        eprintln!("zworkspace: logging to {} ({err})", dir.display());
        Ok(dir)
    })
}

/// Daily rolling file log filtered by `RUST_LOG`. `None` when no directory is writable or a
/// subscriber is already installed.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = resolve_log_dir().ok()?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, LOG_FILE));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));
    tracing::debug!(log_dir = %log_dir.display(), "logging initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}
