//! Cache Manager Module
//!
//! The chat client's entity cache: users and channels by numeric id, messages
//! by message id, user-states by channel name, and a per-channel index of
//! participant names.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use crate::cache::{CacheClient, CacheProvider, CacheSize, CacheStats, DefaultCacheProvider};
use crate::config::Config;
use crate::entities::{ChatChannel, ChatMessage, ChatUser, Entity, UserState};
use crate::error::{CacheError, Result};

/// Statistics for every cache owned by a [`CacheManager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheManagerStats {
    pub users: CacheStats,
    pub channels: CacheStats,
    pub messages: CacheStats,
    pub user_states: CacheStats,
    /// Number of channels with a name list
    pub name_index: usize,
}

// == Cache Manager ==
/// Concurrent entity cache shared by chat event handling and REST lookups.
///
/// Only the message cache is bounded. Stored entities are handed out as
/// `Arc` snapshots; callers never mutate cached values in place.
pub struct CacheManager<P: CacheProvider = DefaultCacheProvider> {
    users: P::Client<u64, ChatUser>,
    channels: P::Client<u64, ChatChannel>,
    messages: P::Client<String, ChatMessage>,
    user_states: P::Client<String, UserState>,
    names: DashMap<String, Vec<String>>,
}

impl CacheManager<DefaultCacheProvider> {
    /// Creates a manager backed by [`DefaultCacheProvider`].
    pub fn new(config: &Config) -> Self {
        Self::with_provider(config.message_cache_size, &DefaultCacheProvider)
    }
}

impl<P: CacheProvider> CacheManager<P> {
    /// Creates a manager whose caches are built by `provider`.
    pub fn with_provider(max_message_cache_size: CacheSize, provider: &P) -> Self {
        debug!(?max_message_cache_size, "Creating entity cache");
        Self {
            users: provider.create::<u64, ChatUser>(CacheSize::Unbounded),
            channels: provider.create::<u64, ChatChannel>(CacheSize::Unbounded),
            messages: provider.create::<String, ChatMessage>(max_message_cache_size),
            user_states: provider.create::<String, UserState>(CacheSize::Unbounded),
            names: DashMap::new(),
        }
    }

    // == Add ==
    pub fn add_user(&self, user: ChatUser) {
        self.users.add(user.key(), user);
    }

    pub fn add_channel(&self, channel: ChatChannel) {
        self.channels.add(channel.key(), channel);
    }

    pub fn add_message(&self, message: ChatMessage) {
        self.messages.add(message.key(), message);
    }

    pub fn add_user_state(&self, user_state: UserState) {
        self.user_states.add(user_state.key(), user_state);
    }

    /// Appends `names` to the list for `channel`, creating it if absent.
    ///
    /// The append runs under the channel's shard lock, so concurrent callers
    /// for the same channel never lose each other's names.
    pub fn add_names<I, S>(&self, channel: &str, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entry = self.names.entry(channel.to_string()).or_default();
        let before = entry.len();
        entry.extend(names.into_iter().map(Into::into));
        debug!(channel, added = entry.len() - before, total = entry.len(), "Merged channel names");
    }

    // == Remove ==
    pub fn remove_user(&self, id: u64) -> Option<Arc<ChatUser>> {
        self.users.remove(&id)
    }

    pub fn remove_channel(&self, id: u64) -> Option<Arc<ChatChannel>> {
        self.channels.remove(&id)
    }

    pub fn remove_message(&self, id: &str) -> Option<Arc<ChatMessage>> {
        self.messages.remove(id)
    }

    pub fn remove_user_state(&self, channel: &str) -> Option<Arc<UserState>> {
        self.user_states.remove(channel)
    }

    pub fn remove_names(&self, channel: &str) -> Option<Vec<String>> {
        self.names.remove(channel).map(|(_, names)| names)
    }

    // == Get ==
    pub fn get_user(&self, id: u64) -> Option<Arc<ChatUser>> {
        self.users.get(&id)
    }

    pub fn get_channel(&self, id: u64) -> Option<Arc<ChatChannel>> {
        self.channels.get(&id)
    }

    pub fn get_message(&self, id: &str) -> Option<Arc<ChatMessage>> {
        self.messages.get(id)
    }

    pub fn get_user_state(&self, channel: &str) -> Option<Arc<UserState>> {
        self.user_states.get(channel)
    }

    /// Returns a copy of the name list for `channel`.
    pub fn get_names(&self, channel: &str) -> Option<Vec<String>> {
        self.names.get(channel).map(|names| names.clone())
    }

    // == Find By Name ==
    /// Looks a user up by login name.
    ///
    /// Returns `Ok(None)` when no user matches and
    /// [`CacheError::AmbiguousName`] when more than one does.
    pub fn find_user_by_name(&self, name: &str) -> Result<Option<Arc<ChatUser>>> {
        find_single(self.users.entities(), name, |user| &user.name)
    }

    /// Looks a channel up by name, with the same policy as [`Self::find_user_by_name`].
    pub fn find_channel_by_name(&self, name: &str) -> Result<Option<Arc<ChatChannel>>> {
        find_single(self.channels.entities(), name, |channel| &channel.name)
    }

    // == Get Or Add ==
    pub fn get_or_add_user<F>(&self, id: u64, factory: F) -> Arc<ChatUser>
    where
        F: FnOnce(&u64) -> ChatUser,
    {
        self.users.get_or_add(id, factory)
    }

    pub fn get_or_add_channel<F>(&self, id: u64, factory: F) -> Arc<ChatChannel>
    where
        F: FnOnce(&u64) -> ChatChannel,
    {
        self.channels.get_or_add(id, factory)
    }

    /// Takes the id by value since a miss stores it as the key.
    pub fn get_or_add_message<F>(&self, id: impl Into<String>, factory: F) -> Arc<ChatMessage>
    where
        F: FnOnce(&String) -> ChatMessage,
    {
        self.messages.get_or_add(id.into(), factory)
    }

    pub fn try_get_or_add_user<E, F>(&self, id: u64, factory: F) -> std::result::Result<Arc<ChatUser>, E>
    where
        F: FnOnce(&u64) -> std::result::Result<ChatUser, E>,
    {
        self.users.try_get_or_add(id, factory)
    }

    pub fn try_get_or_add_channel<E, F>(
        &self,
        id: u64,
        factory: F,
    ) -> std::result::Result<Arc<ChatChannel>, E>
    where
        F: FnOnce(&u64) -> std::result::Result<ChatChannel, E>,
    {
        self.channels.try_get_or_add(id, factory)
    }

    pub fn try_get_or_add_message<E, F>(
        &self,
        id: impl Into<String>,
        factory: F,
    ) -> std::result::Result<Arc<ChatMessage>, E>
    where
        F: FnOnce(&String) -> std::result::Result<ChatMessage, E>,
    {
        self.messages.try_get_or_add(id.into(), factory)
    }

    // == Snapshots ==
    pub fn users(&self) -> Vec<Arc<ChatUser>> {
        self.users.entities()
    }

    pub fn channels(&self) -> Vec<Arc<ChatChannel>> {
        self.channels.entities()
    }

    pub fn messages(&self) -> Vec<Arc<ChatMessage>> {
        self.messages.entities()
    }

    pub fn user_states(&self) -> Vec<Arc<UserState>> {
        self.user_states.entities()
    }

    pub fn name_index_len(&self) -> usize {
        self.names.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheManagerStats {
        CacheManagerStats {
            users: self.users.stats(),
            channels: self.channels.stats(),
            messages: self.messages.stats(),
            user_states: self.user_states.stats(),
            name_index: self.names.len(),
        }
    }
}

/// Returns the only entity whose name equals `name`.
fn find_single<V, F>(snapshot: Vec<Arc<V>>, name: &str, name_of: F) -> Result<Option<Arc<V>>>
where
    F: Fn(&V) -> &String,
{
    let mut matches = snapshot.into_iter().filter(|v| name_of(&**v) == name);
    let first = matches.next();
    let extra = matches.count();

    if extra > 0 {
        return Err(CacheError::AmbiguousName {
            name: name.to_string(),
            matches: extra + 1,
        });
    }
    Ok(first)
}

impl<P: CacheProvider> std::fmt::Debug for CacheManager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("users", &self.users.len())
            .field("channels", &self.channels.len())
            .field("messages", &self.messages.len())
            .field("user_states", &self.user_states.len())
            .field("names", &self.names.len())
            .finish()
    }
}
