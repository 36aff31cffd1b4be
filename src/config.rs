//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::CacheSize;
use crate::logging::LogSeverity;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bound on the chat message cache; the other caches are unbounded
    pub message_cache_size: CacheSize,
    /// Most verbose severity forwarded to log subscribers
    pub log_level: LogSeverity,
    /// Port the cache inspector listens on
    pub inspector_port: u16,
    /// Recorded chat events loaded into the cache at startup
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MESSAGE_CACHE_SIZE` - Max cached chat messages, negative for unbounded (default: 100)
    /// - `LOG_LEVEL` - One of critical, error, warning, info, verbose, debug (default: info)
    /// - `INSPECTOR_PORT` - Cache inspector HTTP port (default: 3000)
    /// - `INSPECTOR_SEED_FILE` - JSON feed to preload into the cache (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            message_cache_size: lookup("MESSAGE_CACHE_SIZE")
                .and_then(|v| v.trim().parse::<i64>().ok())
                .map(CacheSize::from_signed)
                .unwrap_or(defaults.message_cache_size),
            log_level: lookup("LOG_LEVEL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_level),
            inspector_port: lookup("INSPECTOR_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.inspector_port),
            seed_file: lookup("INSPECTOR_SEED_FILE")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message_cache_size: CacheSize::Bounded(100),
            log_level: LogSeverity::Info,
            inspector_port: 3000,
            seed_file: None,
        }
    }
}
