//! Cache Seeding
//!
//! Replays a recorded batch of chat events into an entity cache. The
//! inspector binary uses it to start from a captured feed instead of an empty
//! cache.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::CacheManager;
use crate::entities::model::{ChatUserModel, MessageEvent, RoomStateEvent, UserStateEvent};
use crate::entities::{ChatChannel, ChatMessage, ChatUser, UserState};

/// A recorded batch of chat events. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheSeed {
    pub users: Vec<ChatUserModel>,
    pub room_states: Vec<RoomStateEvent>,
    pub messages: Vec<MessageEvent>,
    pub user_states: Vec<UserStateEvent>,
    /// Channel name to participant names, as NAMES chunks would deliver them
    pub names: BTreeMap<String, Vec<String>>,
}

/// How many events of each kind were applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub channels: usize,
    pub messages: usize,
    pub user_states: usize,
    pub name_lists: usize,
}

impl CacheSeed {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads and parses a seed file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))
    }

    /// Applies every event to `cache` in the order chat would deliver them:
    /// room states, then users, then messages.
    ///
    /// A message whose author is not cached yet also registers the author.
    pub fn apply(&self, cache: &CacheManager) -> SeedSummary {
        for event in &self.room_states {
            cache.add_channel(ChatChannel::from_room_state(event));
        }
        for model in &self.users {
            cache.add_user(ChatUser::from_model(model));
        }
        for event in &self.messages {
            cache.get_or_add_user(event.user_id, |id| ChatUser::new(*id, event.user_name.clone()));
            cache.add_message(ChatMessage::from_event(event));
        }
        for event in &self.user_states {
            cache.add_user_state(UserState::from_event(event));
        }
        for (channel, names) in &self.names {
            cache.add_names(channel, names.iter().cloned());
        }

        let summary = SeedSummary {
            users: self.users.len(),
            channels: self.room_states.len(),
            messages: self.messages.len(),
            user_states: self.user_states.len(),
            name_lists: self.names.len(),
        };
        debug!(?summary, "Applied cache seed");
        summary
    }
}
