//! Chat channel entity.

use serde::Serialize;

use super::model::RoomStateEvent;
use super::Entity;

/// A joined chat channel together with its current room state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatChannel {
    pub id: u64,
    pub name: String,
    pub broadcaster_language: Option<String>,
    /// Minutes a user must follow before chatting, -1 when disabled
    pub followers_only_mode: i32,
    pub is_followers_only: bool,
    pub is_emote_only: bool,
    pub is_r9k: bool,
    pub is_slow: bool,
    pub is_subs_only: bool,
}

impl ChatChannel {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            broadcaster_language: None,
            followers_only_mode: -1,
            is_followers_only: false,
            is_emote_only: false,
            is_r9k: false,
            is_slow: false,
            is_subs_only: false,
        }
    }

    pub fn from_room_state(model: &RoomStateEvent) -> Self {
        let mut channel = Self::new(model.channel_id, model.channel_name.clone());
        channel.update(model);
        channel
    }

    pub fn update(&mut self, model: &RoomStateEvent) {
        self.name.clone_from(&model.channel_name);
        self.broadcaster_language.clone_from(&model.broadcaster_lang);
        self.followers_only_mode = model.followers_only_mode;
        // 0 means followers-only with no minimum follow age
        self.is_followers_only = model.followers_only_mode >= 0;
        self.is_emote_only = model.is_emote_only;
        self.is_r9k = model.is_r9k;
        self.is_slow = model.is_slow;
        self.is_subs_only = model.is_subs_only;
    }
}

impl Entity for ChatChannel {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}
