use std::io::IsTerminal;

use crate::logger::format::LoggerFormat;

/// Level used when none is given or the given one does not parse.
pub const DEFAULT_LEVEL: &str = "info";

/// Logger settings, usually derived from `LOG_LEVEL` / `LOG_FORMAT`.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `sumo_core=debug,info`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
    /// journald `SYSLOG_IDENTIFIER`; the process name when unset.
    pub syslog_identifier: Option<String>,
}

impl LoggerConfig {
    pub fn with_format(mut self, format: LoggerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_syslog_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.syslog_identifier = Some(identifier.into());
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: DEFAULT_LEVEL.to_string(),
            with_targets: true,
            use_color,
            syslog_identifier: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_text_at_info() {
        let cfg = LoggerConfig::default();
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level, "info");
        assert!(cfg.with_targets);
        assert!(cfg.syslog_identifier.is_none());
    }

    #[test]
    fn builders_override_fields() {
        let cfg = LoggerConfig::default()
            .with_format(LoggerFormat::Json)
            .with_level("debug")
            .with_syslog_identifier("sumologic-service");
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level, "debug");
        assert_eq!(cfg.syslog_identifier.as_deref(), Some("sumologic-service"));
    }
}
