//! Structured logging initialization.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{TelemetryError, TelemetryResult};

/// Initialize structured logging.
///
/// JSON events go to a daily-rolling file under `dir`; the console
/// gets pretty output for development and JSON when RUST_ENV is
/// "production". `RUST_LOG` overrides `default_level`.
///
/// The returned guard must stay alive for the process lifetime, or
/// buffered file events are dropped on exit.
pub fn init_logging(
    dir: &str,
    file_prefix: &str,
    default_level: &str,
) -> TelemetryResult<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_appender = tracing_appender::rolling::daily(dir, file_prefix);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().json().with_writer(file_writer);

    let is_production = std::env::var("RUST_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);

    if is_production {
        // JSON on the console as well for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        // Pretty format for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_names(true),
            )
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    tracing::debug!(dir, file_prefix, "Logging initialized");
    Ok(guard)
}
