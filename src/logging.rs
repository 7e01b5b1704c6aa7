//! Tracing subscriber setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// File name prefix of the rolling log files.
const LOG_FILE_PREFIX: &str = "lazy-ui-translator.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `settings.filter`. With a log directory
/// configured, events go to a daily rolling file and the returned guard must
/// be held until exit; otherwise they go to stderr.
pub fn init(settings: &LogSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(directory) = &settings.directory {
        let (writer, guard) = tracing_appender::non_blocking(rolling::daily(directory, LOG_FILE_PREFIX));
        if subscriber.with_ansi(false).with_writer(writer).try_init().is_err() {
            tracing::debug!("Global subscriber already installed");
        }
        Some(guard)
    } else {
        if subscriber.with_writer(std::io::stderr).try_init().is_err() {
            tracing::debug!("Global subscriber already installed");
        }
        None
    }
}
