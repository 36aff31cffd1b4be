//! API Models
//!
//! Wire shapes as they arrive from the chat connection and the REST API.
//! Entities copy their fields out of these in `update`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// User tags carried on chat events.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUserModel {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// ROOMSTATE event for a joined channel.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomStateEvent {
    pub channel_id: u64,
    pub channel_name: String,
    #[serde(default)]
    pub broadcaster_lang: Option<String>,
    /// Minutes a user must follow before chatting, -1 when disabled
    #[serde(default = "disabled")]
    pub followers_only_mode: i32,
    #[serde(default)]
    pub is_emote_only: bool,
    #[serde(default)]
    pub is_r9k: bool,
    #[serde(default)]
    pub is_slow: bool,
    #[serde(default)]
    pub is_subs_only: bool,
}

fn disabled() -> i32 {
    -1
}

/// PRIVMSG event.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEvent {
    pub id: String,
    pub channel_id: u64,
    pub channel_name: String,
    pub user_id: u64,
    pub user_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// USERSTATE event: the client's own state in one channel.
#[derive(Debug, Clone, Deserialize)]
pub struct UserStateEvent {
    pub channel_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub is_moderator: bool,
    #[serde(default)]
    pub is_subscriber: bool,
}

/// Helix user object. Every field except the id may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelixUser {
    pub id: u64,
    #[serde(default, rename = "display_name")]
    pub name: Option<String>,
    #[serde(default, rename = "login")]
    pub username: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub broadcaster_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub offline_image_url: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
}

/// Community object from the v5 REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityModel {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_image_url: Option<String>,
}
