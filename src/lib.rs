//! twitch_kit - Twitch REST and chat client core
//!
//! Typed entities, REST request builders, a concurrent entity cache and a
//! subscriber-based log manager, plus a read-only HTTP inspector for the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod models;
pub mod rest;
pub mod seed;

pub use api::AppState;
pub use cache::{CacheManager, CacheSize};
pub use config::Config;
pub use error::{CacheError, Result};
pub use logging::{LogManager, LogSeverity};
pub use seed::CacheSeed;
