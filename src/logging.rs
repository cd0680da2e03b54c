use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::SrsConfig;

const LOG_FILE_PREFIX: &str = "srs.log";

/// Keeps the non-blocking file writer alive; drop it last.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber. A second call leaves the first one in place.
pub fn init_tracing(config: &SrsConfig) -> Option<FileLogGuard> {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);

    if config.file_logs_enabled {
        let log_dir = &config.log_dir;
        if let Err(err) = std::fs::create_dir_all(log_dir) {
            eprintln!("failed to create log directory {}: {err}", log_dir.display());
        } else {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true);

            let installed = tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .try_init();

            return match installed {
                Ok(()) => Some(FileLogGuard { _guard: guard }),
                Err(_) => None,
            };
        }
    }

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init();

    None
}
