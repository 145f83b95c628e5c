//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::LogSettings;
use crate::error::AppError;

/// Keeps the non-blocking file writers flushing until dropped.
#[must_use = "dropping the guard stops file logging"]
pub struct TelemetryGuard {
    _guards: Vec<WorkerGuard>,
}

/// Installs the global subscriber: console output plus, when a directory is
/// configured, a daily `combined.log` and an ERROR-only `error.log`.
///
/// `RUST_LOG` wins over `log.level` when set.
pub fn init_telemetry(settings: &LogSettings, production: bool) -> Result<TelemetryGuard, AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;

    let console_layer = if production || settings.json {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };

    let mut guards = Vec::new();
    let (combined_layer, error_layer) = if settings.directory.is_empty() {
        (None, None)
    } else {
        let (combined, combined_guard) = tracing_appender::non_blocking(
            tracing_appender::rolling::daily(&settings.directory, "combined.log"),
        );
        let (errors, errors_guard) = tracing_appender::non_blocking(
            tracing_appender::rolling::daily(&settings.directory, "error.log"),
        );
        guards.push(combined_guard);
        guards.push(errors_guard);
        (
            Some(fmt::layer().with_ansi(false).with_writer(combined)),
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(errors)
                    .with_filter(LevelFilter::ERROR),
            ),
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(combined_layer)
        .with(error_layer)
        .try_init()
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;

    Ok(TelemetryGuard { _guards: guards })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_rejected() {
        // RUST_LOG would mask the configured level
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let settings = LogSettings {
            level: "mygroup=notalevel".into(),
            directory: String::new(),
            json: false,
        };
        assert!(matches!(
            init_telemetry(&settings, false),
            Err(AppError::TelemetryError(_))
        ));
    }
}
