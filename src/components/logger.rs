// src/components/logger.rs

//! Logging through the `log` facade with an echo on the console.

use crate::components::icon::Icon;
use crate::core::console::Console;
use crate::core::errors::{ConsoleError, ConsoleResult};
use serde_json::Value;

/// Severity levels, from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// The system is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Errors.
    Error,
    /// Warnings.
    Warning,
    /// Normal but significant events.
    Notice,
    /// Informational messages.
    Info,
    /// Debug detail.
    Debug,
}

impl LogLevel {
    /// Upper-case name shown in the badge.
    pub fn label(self) -> &'static str {
        match self {
            Self::Emergency => "EMERGENCY",
            Self::Alert => "ALERT",
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Notice => "NOTICE",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Emergency | Self::Alert => ("boldWhiteBgRed", Icon::DANGER),
            Self::Critical | Self::Error => ("boldWhiteBgRed", Icon::ERROR),
            Self::Warning => ("boldWhiteBgYellow", Icon::WARNING),
            Self::Notice => ("boldWhiteBgCyan", Icon::INFO),
            Self::Info => ("boldWhiteBgBlue", Icon::INFO),
            Self::Debug => ("boldWhiteBgGray", Icon::SECONDARY),
        }
    }

    /// The `log` crate level records are forwarded at.
    pub fn as_log_level(self) -> log::Level {
        match self {
            Self::Emergency | Self::Alert | Self::Critical | Self::Error => log::Level::Error,
            Self::Warning => log::Level::Warn,
            Self::Notice | Self::Info => log::Level::Info,
            Self::Debug => log::Level::Debug,
        }
    }

    /// Parses a level name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "emergency" => Some(Self::Emergency),
            "alert" => Some(Self::Alert),
            "critical" => Some(Self::Critical),
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "notice" => Some(Self::Notice),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

/// Logs to the `log` facade and echoes each record on the console with a level badge.
///
/// Records are prefixed `[PREFIX] message`; nested prefixes are joined with ` > `.
#[derive(Debug, Clone)]
pub struct Logger<'a> {
    console: &'a Console,
    prefix: String,
}

impl<'a> Logger<'a> {
    /// A logger using the console's configured prefix.
    ///
    /// # Errors
    /// Returns `ConsoleError::LoggerNotConfigured` when the console has no logger.
    pub fn new(console: &'a Console) -> ConsoleResult<Self> {
        let prefix = console
            .logger_prefix()
            .ok_or(ConsoleError::LoggerNotConfigured)?
            .to_string();
        Ok(Self { console, prefix })
    }

    /// The full prefix, nested parts included.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// A logger whose prefix is this one's followed by `prefix`.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        let prefix = if self.prefix.is_empty() {
            prefix.to_string()
        } else {
            format!("{} > {}", self.prefix, prefix)
        };
        Self {
            console: self.console,
            prefix,
        }
    }

    /// Logs `message` at `level`, with `context` appended to the record as JSON.
    pub fn log(&self, level: LogLevel, message: &str, context: Option<&Value>) {
        let (style, icon) = level.style();
        self.record(level, message, context, style, icon);
    }

    /// Logs at [`LogLevel::Emergency`].
    pub fn emergency(&self, message: &str) {
        self.log(LogLevel::Emergency, message, None);
    }

    /// Logs at [`LogLevel::Alert`].
    pub fn alert(&self, message: &str) {
        self.log(LogLevel::Alert, message, None);
    }

    /// Logs at [`LogLevel::Critical`].
    pub fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message, None);
    }

    /// Logs at [`LogLevel::Error`].
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }

    /// Logs at [`LogLevel::Warning`].
    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message, None);
    }

    /// Logs at [`LogLevel::Notice`].
    pub fn notice(&self, message: &str) {
        self.log(LogLevel::Notice, message, None);
    }

    /// Logs at [`LogLevel::Info`].
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Logs at [`LogLevel::Debug`].
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    /// An info record shown with a green badge.
    pub fn success(&self, message: &str) {
        self.record(LogLevel::Info, message, None, "boldWhiteBgGreen", Icon::SUCCESS);
    }

    /// Logs through a method name: level names plus `warn`, `danger`, `fail`
    /// and `success`.
    ///
    /// # Errors
    /// Returns `ConsoleError::BadMethodCall` for any other name.
    pub fn dispatch(&self, method: &str, message: &str) -> ConsoleResult<()> {
        match method {
            "success" => self.success(message),
            "warn" => self.warning(message),
            "danger" | "fail" => self.error(message),
            other => {
                let level = LogLevel::from_name(other)
                    .ok_or_else(|| ConsoleError::BadMethodCall(format!("Logger::{}", other)))?;
                self.log(level, message, None);
            }
        }
        Ok(())
    }

    fn prefixed(&self, message: &str) -> String {
        if self.prefix.is_empty() {
            message.to_string()
        } else {
            format!("[{}] {}", self.prefix, message)
        }
    }

    fn record(&self, level: LogLevel, message: &str, context: Option<&Value>, style: &str, icon: &str) {
        match context {
            Some(ctx) => log::log!(level.as_log_level(), "{} {}", self.prefixed(message), ctx),
            None => log::log!(level.as_log_level(), "{}", self.prefixed(message)),
        }

        let icons = self.console.components().default_icons_enabled();
        let icon_part = if icons { format!("{} ", icon) } else { String::new() };
        let mut display = message.to_string();
        if let Some(ctx) = context.filter(|c| icons && !is_empty_context(c)) {
            display.push(' ');
            display.push_str(&ctx.to_string());
        }

        let mut writer = self.console.writer();
        writer.styled(style, &format!(" {}{} ", icon_part, level.label()));
        writer.writeln(&format!(" {}", display));
    }
}

fn is_empty_context(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::writer::{MemorySink, Writer};
    use serde_json::json;

    fn setup(prefix: Option<&str>) -> (Console, MemorySink) {
        let sink = MemorySink::new();
        let mut console = Console::with_writer("t", "1", Writer::with_sink(Box::new(sink.clone())));
        if let Some(prefix) = prefix {
            console.set_logger(prefix);
        }
        (console, sink)
    }

    #[test]
    fn test_requires_configuration() {
        let (console, _) = setup(None);
        assert!(matches!(Logger::new(&console), Err(ConsoleError::LoggerNotConfigured)));
    }

    #[test]
    fn test_prefix_chaining() {
        let (console, _) = setup(Some("app"));
        let logger = Logger::new(&console).unwrap();
        let nested = logger.with_prefix("db").with_prefix("pool");
        assert_eq!(nested.prefix(), "app > db > pool");
        assert_eq!(nested.prefixed("up"), "[app > db > pool] up");

        let (bare_console, _) = setup(Some(""));
        let bare = Logger::new(&bare_console).unwrap();
        assert_eq!(bare.with_prefix("db").prefix(), "db");
        assert_eq!(bare.prefixed("up"), "up");
    }

    #[test]
    fn test_console_display() {
        let (console, sink) = setup(Some("app"));
        let logger = Logger::new(&console).unwrap();
        logger.warning("Disk low");
        logger.success("Done");
        assert_eq!(sink.contents(), " WARNING  Disk low\n INFO  Done\n");
    }

    #[test]
    fn test_context_shown_only_with_icons() {
        let (console, sink) = setup(Some("app"));
        let logger = Logger::new(&console).unwrap();
        let ctx = json!({"id": 7});
        logger.log(LogLevel::Info, "saved", Some(&ctx));
        console.components().show_default_icons(true);
        logger.log(LogLevel::Info, "saved", Some(&ctx));
        assert_eq!(sink.contents(), " INFO  saved\n ℹ INFO  saved {\"id\":7}\n");
    }

    #[test]
    fn test_dispatch() {
        let (console, sink) = setup(Some("app"));
        let logger = Logger::new(&console).unwrap();
        logger.dispatch("warn", "a").unwrap();
        logger.dispatch("fail", "b").unwrap();
        logger.dispatch("notice", "c").unwrap();
        let err = logger.dispatch("shout", "d").unwrap_err();
        assert!(matches!(err, ConsoleError::BadMethodCall(_)));
        assert_eq!(sink.contents(), " WARNING  a\n ERROR  b\n NOTICE  c\n");
    }
}
