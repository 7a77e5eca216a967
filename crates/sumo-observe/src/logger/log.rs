use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::{Subscriber, warn};
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::logger::{
    config::{DEFAULT_LEVEL, LoggerConfig},
    error::LoggerError,
};

pub(crate) struct Logger;

impl Logger {
    pub(crate) fn text(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let layer = fmt::layer()
            .with_ansi(cfg.use_color)
            .with_target(cfg.with_targets)
            .with_timer(local_rfc3339());

        let (filter, rejected) = filter_or_default(&cfg.level);
        install(tracing_subscriber::registry().with(filter).with(layer))?;
        report_rejected(rejected);
        Ok(())
    }

    /// One JSON object per line. Event fields sit at the top level; the
    /// current span (`project`, `keptn_context`, ...) is nested under `"span"`.
    pub(crate) fn json(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_ansi(false)
            .with_target(cfg.with_targets)
            .with_timer(local_rfc3339());

        let (filter, rejected) = filter_or_default(&cfg.level);
        install(tracing_subscriber::registry().with(filter).with(layer))?;
        report_rejected(rejected);
        Ok(())
    }

    pub(crate) fn journald(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let (filter, rejected) = filter_or_default(&cfg.level);
        journald(filter, cfg.syslog_identifier.clone())?;
        report_rejected(rejected);
        Ok(())
    }
}

pub(crate) fn filter(level: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(level).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

/// Like [`filter`], but an invalid directive yields [`DEFAULT_LEVEL`] plus the rejection.
pub(crate) fn filter_or_default(level: &str) -> (EnvFilter, Option<LoggerError>) {
    match filter(level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LEVEL), Some(e)),
    }
}

fn report_rejected(rejected: Option<LoggerError>) {
    if let Some(e) = rejected {
        warn!(error = %e, fallback = DEFAULT_LEVEL, "ignoring log level");
    }
}

fn local_rfc3339() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn install<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber.try_init().map_err(|e| {
        let msg = e.to_string();
        if msg.contains("SetGlobalDefaultError") || msg.contains("global default") {
            LoggerError::AlreadyInitialized
        } else {
            LoggerError::InitializationFailed(msg)
        }
    })
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald(filter: EnvFilter, identifier: Option<String>) -> Result<(), LoggerError> {
    let mut layer = tracing_journald::layer()
        .map_err(|e| LoggerError::InitializationFailed(format!("journald: {e}")))?;
    if let Some(identifier) = identifier {
        layer = layer.with_syslog_identifier(identifier);
    }
    install(tracing_subscriber::registry().with(filter).with(layer))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald(_filter: EnvFilter, _identifier: Option<String>) -> Result<(), LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}
