use std::io::IsTerminal;

use serde::Deserialize;

use crate::logger::format::LoggerFormat;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `rbt_core=debug,info`.
    pub level: String,
    pub with_targets: bool,
    /// Json only: add the full `batch` → `server` span chain to every line.
    pub span_list: bool,
    /// Journald only: `SYSLOG_IDENTIFIER` of every entry.
    pub syslog_identifier: String,
    #[serde(skip)]
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            span_list: true,
            syslog_identifier: "rbt".to_string(),
            use_color: std::io::stdout().is_terminal(),
        }
    }
}
