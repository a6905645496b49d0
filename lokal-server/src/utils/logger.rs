//! Logging Infrastructure
//!
//! `tracing` subscriber with an `EnvFilter`, optional JSON output and an
//! optional daily rolling log file.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `LOG_LEVEL` is set
const DEFAULT_FILTER: &str = "lokal_server=info,tower_http=info";

/// Initialize the global subscriber.
///
/// Precedence for the filter: `RUST_LOG`, then `log_level`, then [`DEFAULT_FILTER`].
/// A `log_dir` that does not exist (and cannot be created) falls back to stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match log_level {
        Some(level) => EnvFilter::try_new(format!("lokal_server={level},tower_http={level}"))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        None => EnvFilter::new(DEFAULT_FILTER),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if (log_path.exists() || std::fs::create_dir_all(log_path).is_ok())
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "lokal-server");
            let builder = builder.with_writer(file_appender).with_ansi(false);
            let result = if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            if let Err(e) = result {
                eprintln!("logger already initialized: {e}");
            }
            return;
        }
        eprintln!("LOG_DIR {dir} is not usable, logging to stdout");
    }

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("logger already initialized: {e}");
    }
}
