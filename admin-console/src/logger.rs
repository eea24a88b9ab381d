//! Logging Infrastructure
//!
//! Console layer on stderr plus an optional daily rolling file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "admin-console.log";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,admin_console={level},admin_client={level},hyper=warn,reqwest=warn"
        ))
    })
}

/// Initialize the logger. Keep the returned guard alive until exit so the
/// file writer flushes.
pub fn init_logger(level: &str, log_dir: Option<&Path>) -> std::io::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let (non_blocking_file, guard) =
                tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE_PREFIX));
            let layer = fmt::layer()
                .with_timer(LocalTimer)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_writer(non_blocking_file);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(file_layer)
        .with(stderr_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::debug!(path = %dir.display(), "File logging enabled");
    }
    Ok(guard)
}
