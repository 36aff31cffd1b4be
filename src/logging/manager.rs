//! Log manager: subscriber list and severity filter.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, trace, warn};

use super::{LogMessage, LogSeverity};

/// Version of the Twitch API the request builders target.
pub const API_VERSION: u32 = 5;

/// Callback receiving published log messages.
pub type LogHandler = Arc<dyn Fn(&LogMessage) -> anyhow::Result<()> + Send + Sync>;

/// Handle returned by [`LogManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// == Log Manager ==
/// Publishes log messages to subscribed handlers.
///
/// Handlers run in subscription order. A handler that returns an error or
/// panics is reported through `tracing` and the remaining handlers still run.
pub struct LogManager {
    level: LogSeverity,
    handlers: RwLock<Vec<(SubscriptionId, LogHandler)>>,
    next_id: AtomicU64,
}

impl LogManager {
    /// Creates a manager that drops messages more verbose than `min_severity`.
    pub fn new(min_severity: LogSeverity) -> Self {
        Self {
            level: min_severity,
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn level(&self) -> LogSeverity {
        self.level
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&LogMessage) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.write().push((id, Arc::new(handler)));
        id
    }

    /// Removes a handler. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(sub, _)| *sub != id);
        handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Delivers `message` to every handler, returning how many succeeded.
    ///
    /// Messages more verbose than the configured level are dropped and
    /// return 0.
    pub fn publish(&self, message: &LogMessage) -> usize {
        if message.severity > self.level {
            return 0;
        }
        mirror_to_tracing(message);

        // Handlers run without the lock held so they may (un)subscribe.
        let handlers: Vec<LogHandler> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        let mut delivered = 0;
        for handler in handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(message))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(err)) => warn!(error = %err, source = %message.source, "Log handler failed"),
                Err(_) => warn!(source = %message.source, "Log handler panicked"),
            }
        }
        delivered
    }

    pub fn log(
        &self,
        severity: LogSeverity,
        source: &str,
        message: Option<&str>,
        err: Option<&anyhow::Error>,
    ) -> usize {
        if severity > self.level {
            return 0;
        }
        let message = LogMessage::new(
            severity,
            source,
            message.map(str::to_string),
            err.map(|e| format!("{e:#}")),
        );
        self.publish(&message)
    }

    pub fn critical(&self, source: &str, message: &str) -> usize {
        self.log(LogSeverity::Critical, source, Some(message), None)
    }

    pub fn error(&self, source: &str, message: &str, err: Option<&anyhow::Error>) -> usize {
        self.log(LogSeverity::Error, source, Some(message), err)
    }

    pub fn warning(&self, source: &str, message: &str, err: Option<&anyhow::Error>) -> usize {
        self.log(LogSeverity::Warning, source, Some(message), err)
    }

    pub fn info(&self, source: &str, message: &str) -> usize {
        self.log(LogSeverity::Info, source, Some(message), None)
    }

    pub fn verbose(&self, source: &str, message: &str) -> usize {
        self.log(LogSeverity::Verbose, source, Some(message), None)
    }

    pub fn debug(&self, source: &str, message: &str) -> usize {
        self.log(LogSeverity::Debug, source, Some(message), None)
    }

    /// Returns a logger that tags every message with `name`.
    pub fn create_logger(self: &Arc<Self>, name: impl Into<String>) -> Logger {
        Logger {
            manager: Arc::clone(self),
            name: name.into(),
        }
    }

    /// Announces the library and API version.
    pub fn write_initial_log(&self) -> usize {
        self.info(
            "Client",
            &format!(
                "twitch_kit v{} (API v{})",
                env!("CARGO_PKG_VERSION"),
                API_VERSION
            ),
        )
    }
}

impl std::fmt::Debug for LogManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogManager")
            .field("level", &self.level)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn mirror_to_tracing(message: &LogMessage) {
    let source = message.source.as_str();
    let text = message.message.as_deref().unwrap_or_default();
    let err = message.error.as_deref();
    match message.severity {
        LogSeverity::Critical | LogSeverity::Error => error!(source, error = err, "{text}"),
        LogSeverity::Warning => warn!(source, error = err, "{text}"),
        LogSeverity::Info => info!(source, "{text}"),
        LogSeverity::Verbose => debug!(source, "{text}"),
        LogSeverity::Debug => trace!(source, "{text}"),
    }
}

// == Logger ==
/// A [`LogManager`] handle bound to one source name.
#[derive(Clone)]
pub struct Logger {
    manager: Arc<LogManager>,
    name: String,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log(&self, severity: LogSeverity, message: &str, err: Option<&anyhow::Error>) -> usize {
        self.manager.log(severity, &self.name, Some(message), err)
    }

    pub fn error(&self, message: &str, err: Option<&anyhow::Error>) -> usize {
        self.log(LogSeverity::Error, message, err)
    }

    pub fn warning(&self, message: &str, err: Option<&anyhow::Error>) -> usize {
        self.log(LogSeverity::Warning, message, err)
    }

    pub fn info(&self, message: &str) -> usize {
        self.log(LogSeverity::Info, message, None)
    }

    pub fn debug(&self, message: &str) -> usize {
        self.log(LogSeverity::Debug, message, None)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder(
        log: &Arc<Mutex<Vec<String>>>,
        tag: &'static str,
    ) -> impl Fn(&LogMessage) -> anyhow::Result<()> + Send + Sync + 'static {
        let log = Arc::clone(log);
        move |message| {
            log.lock()
                .push(format!("{tag}:{}", message.message.clone().unwrap_or_default()));
            Ok(())
        }
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let manager = LogManager::new(LogSeverity::Debug);
        let seen = Arc::new(Mutex::new(Vec::new()));
        manager.subscribe(recorder(&seen, "first"));
        manager.subscribe(recorder(&seen, "second"));

        assert_eq!(manager.info("Test", "hello"), 2);
        assert_eq!(*seen.lock(), vec!["first:hello", "second:hello"]);
    }

    #[test]
    fn test_failing_handler_does_not_block_delivery() {
        let manager = LogManager::new(LogSeverity::Debug);
        let seen = Arc::new(Mutex::new(Vec::new()));
        manager.subscribe(|_| anyhow::bail!("sink unavailable"));
        manager.subscribe(recorder(&seen, "after"));

        assert_eq!(manager.warning("Test", "careful", None), 1);
        assert_eq!(*seen.lock(), vec!["after:careful"]);
    }

    #[test]
    fn test_panicking_handler_does_not_block_delivery() {
        let manager = LogManager::new(LogSeverity::Debug);
        let seen = Arc::new(Mutex::new(Vec::new()));
        manager.subscribe(recorder(&seen, "before"));
        manager.subscribe(|_| panic!("handler bug"));
        manager.subscribe(recorder(&seen, "after"));

        assert_eq!(manager.error("Test", "still delivered", None), 2);
        assert_eq!(*seen.lock(), vec!["before:still delivered", "after:still delivered"]);
        assert_eq!(manager.subscriber_count(), 3);
    }

    #[test]
    fn test_severity_filter() {
        let manager = LogManager::new(LogSeverity::Warning);
        let seen = Arc::new(Mutex::new(Vec::new()));
        manager.subscribe(recorder(&seen, "h"));

        assert_eq!(manager.debug("Test", "noise"), 0);
        assert_eq!(manager.info("Test", "noise"), 0);
        assert_eq!(manager.critical("Test", "boom"), 1);
        assert_eq!(*seen.lock(), vec!["h:boom"]);
    }

    #[test]
    fn test_unsubscribe() {
        let manager = LogManager::new(LogSeverity::Info);
        let id = manager.subscribe(|_| Ok(()));

        assert!(manager.unsubscribe(id));
        assert!(!manager.unsubscribe(id));
        assert_eq!(manager.subscriber_count(), 0);
        assert_eq!(manager.info("Test", "nobody listening"), 0);
    }

    #[test]
    fn test_logger_tags_source_and_error() {
        let manager = Arc::new(LogManager::new(LogSeverity::Debug));
        let captured = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&captured);
        manager.subscribe(move |message| {
            *sink.lock() = Some(message.clone());
            Ok(())
        });

        let logger = manager.create_logger("Rest");
        let err = anyhow::anyhow!("timed out").context("request failed");
        logger.error("GET users failed", Some(&err));

        let message = captured.lock().clone().unwrap();
        assert_eq!(message.source, "Rest");
        assert_eq!(message.severity, LogSeverity::Error);
        assert_eq!(message.error.as_deref(), Some("request failed: timed out"));
    }

    #[test]
    fn test_write_initial_log() {
        let manager = LogManager::new(LogSeverity::Info);
        let captured = Arc::new(Mutex::new(Vec::new()));
        manager.subscribe(recorder(&captured, "init"));

        manager.write_initial_log();

        let lines = captured.lock().clone();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("(API v5)"));
    }
}
