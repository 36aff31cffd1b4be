//! Logging Module
//!
//! Client-facing log events. Library code publishes [`LogMessage`]s through a
//! [`LogManager`], which hands them to every subscribed handler and mirrors
//! them into `tracing`.

mod manager;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use manager::{LogHandler, LogManager, Logger, SubscriptionId};

// == Log Severity ==
/// Severity of a log message, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Critical,
    Error,
    Warning,
    Info,
    Verbose,
    Debug,
}

impl LogSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSeverity::Critical => "critical",
            LogSeverity::Error => "error",
            LogSeverity::Warning => "warning",
            LogSeverity::Info => "info",
            LogSeverity::Verbose => "verbose",
            LogSeverity::Debug => "debug",
        }
    }
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LogSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(LogSeverity::Critical),
            "error" => Ok(LogSeverity::Error),
            "warning" | "warn" => Ok(LogSeverity::Warning),
            "info" => Ok(LogSeverity::Info),
            "verbose" => Ok(LogSeverity::Verbose),
            "debug" => Ok(LogSeverity::Debug),
            other => Err(format!("unknown log severity '{other}'")),
        }
    }
}

// == Log Message ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogMessage {
    pub severity: LogSeverity,
    /// Component that produced the message
    pub source: String,
    pub message: Option<String>,
    /// Rendered error chain, if the message carries one
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl LogMessage {
    pub fn new(
        severity: LogSeverity,
        source: impl Into<String>,
        message: Option<String>,
        error: Option<String>,
    ) -> Self {
        Self {
            severity,
            source: source.into(),
            message,
            error,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>8} {}:",
            self.timestamp.format("%H:%M:%S"),
            self.severity,
            self.source
        )?;
        if let Some(message) = &self.message {
            write!(f, " {message}")?;
        }
        if let Some(error) = &self.error {
            write!(f, " ({error})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(LogSeverity::Critical < LogSeverity::Error);
        assert!(LogSeverity::Info < LogSeverity::Debug);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("WARN".parse::<LogSeverity>(), Ok(LogSeverity::Warning));
        assert_eq!(" verbose ".parse::<LogSeverity>(), Ok(LogSeverity::Verbose));
        assert!("loud".parse::<LogSeverity>().is_err());
    }

    #[test]
    fn test_message_display() {
        let message = LogMessage::new(
            LogSeverity::Error,
            "Chat",
            Some("Disconnected".to_string()),
            Some("connection reset".to_string()),
        );

        let rendered = message.to_string();
        assert!(rendered.ends_with("   error Chat: Disconnected (connection reset)"));
    }
}
