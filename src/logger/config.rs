use std::io::IsTerminal;

use crate::logger::format::LoggerFormat;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `parcelvisor=debug`.
    pub level: String,
    pub with_targets: bool,
    pub with_time: bool,
    pub use_color: bool,
}

impl LoggerConfig {
    /// Bare console lines: no target, no timestamp.
    pub fn console() -> Self {
        Self {
            with_targets: false,
            with_time: false,
            ..Self::default()
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            with_time: true,
            use_color,
        }
    }
}
