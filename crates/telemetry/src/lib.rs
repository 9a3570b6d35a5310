//! Tracing subscriber bootstrap.
//!
//! `RUST_LOG` takes precedence over the configured `telemetry.log_level`.

use anyhow::Context;
use courselib_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.log_level)
            .with_context(|| format!("invalid log level directive '{}'", settings.log_level)),
    }
}

/// Install the global tracing subscriber.
///
/// Calling this more than once is harmless; later calls keep the first
/// subscriber.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;

    let installed = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!(target: "courselib-telemetry", "tracing subscriber already installed");
    } else {
        tracing::info!(
            target: "courselib-telemetry",
            format = ?settings.log_format,
            "telemetry initialized"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_directive_is_reported() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let settings = TelemetrySettings {
            log_level: "course_library=notalevel".to_string(),
            ..TelemetrySettings::default()
        };
        assert!(env_filter(&settings).is_err());
    }

    #[test]
    fn init_twice_does_not_fail() {
        let settings = TelemetrySettings::default();
        init(&settings).unwrap();
        init(&settings).unwrap();
    }
}
