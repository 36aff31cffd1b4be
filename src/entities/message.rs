//! Chat message and user-state entities.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::{MessageEvent, UserStateEvent};
use super::Entity;

// == Chat Message ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub channel_id: u64,
    pub channel_name: String,
    pub author_id: u64,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn from_event(event: &MessageEvent) -> Self {
        Self {
            id: event.id.clone(),
            channel_id: event.channel_id,
            channel_name: event.channel_name.clone(),
            author_id: event.user_id,
            author_name: event.user_name.clone(),
            content: event.content.clone(),
            created_at: event.timestamp,
        }
    }
}

impl Entity for ChatMessage {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

// == User State ==
/// The client user's own state in one channel, keyed by channel name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserState {
    pub channel_name: String,
    pub display_name: Option<String>,
    pub color: Option<String>,
    pub badges: Vec<String>,
    pub is_moderator: bool,
    pub is_subscriber: bool,
}

impl UserState {
    pub fn from_event(event: &UserStateEvent) -> Self {
        Self {
            channel_name: event.channel_name.clone(),
            display_name: event.display_name.clone(),
            color: event.color.clone(),
            badges: event.badges.clone(),
            is_moderator: event.is_moderator,
            is_subscriber: event.is_subscriber,
        }
    }

    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.iter().any(|b| b == badge)
    }
}

impl Entity for UserState {
    type Key = String;

    fn key(&self) -> String {
        self.channel_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_event() {
        let event: MessageEvent = serde_json::from_str(
            r#"{"id":"b34ccfc7","channel_id":1,"channel_name":"somechan","user_id":2,
                "user_name":"bob","content":"hi chat","timestamp":"2024-03-01T12:00:00Z"}"#,
        )
        .unwrap();

        let message = ChatMessage::from_event(&event);

        assert_eq!(message.key(), "b34ccfc7");
        assert_eq!(message.author_name, "bob");
        assert_eq!(message.created_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_user_state_badges() {
        let state = UserState::from_event(&UserStateEvent {
            channel_name: "somechan".to_string(),
            display_name: Some("Bot".to_string()),
            color: None,
            badges: vec!["moderator/1".to_string()],
            is_moderator: true,
            is_subscriber: false,
        });

        assert_eq!(state.key(), "somechan");
        assert!(state.has_badge("moderator/1"));
        assert!(!state.has_badge("subscriber/0"));
    }
}
