//! Tracing setup for sessions and replays: human-readable output on stdout,
//! optionally mirrored as JSON lines to a daily log file.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LOG_FILE_PREFIX: &str = "gesture-session";
const KEPT_LOG_FILES: usize = 7;

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            enable_file_logs: false,
            log_dir: "./logs".to_string(),
        }
    }
}

fn session_file_writer(log_dir: &str) -> Option<RollingFileAppender> {
    match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("jsonl")
        .max_log_files(KEPT_LOG_FILES)
        .build(log_dir)
    {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!("Session log file disabled, cannot write to {log_dir}: {e}");
            None
        }
    }
}

/// Installs the global subscriber. The returned guard flushes the file log
/// when dropped, so the caller keeps it alive for the whole run. A subscriber
/// that is already installed (several tests in one binary) is left in place.
pub fn init_tracing(config: &LogConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let stdout_layer = fmt::layer().with_target(false).compact();
    let registry = Registry::default().with(env_filter).with(stdout_layer);

    let file = config
        .enable_file_logs
        .then(|| session_file_writer(&config.log_dir))
        .flatten();

    match file {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .json()
                .with_current_span(true);
            registry.with(file_layer).try_init().ok().map(|()| guard)
        }
        None => {
            let _ = registry.try_init();
            None
        }
    }
}
