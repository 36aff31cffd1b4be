//! User entities from chat tags and the Helix users endpoint.

use serde::Serialize;

use super::model::{ChatUserModel, HelixUser};
use super::Entity;

// == Chat User ==
/// A user seen in chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatUser {
    pub id: u64,
    /// Login name, lowercase
    pub name: String,
    pub display_name: String,
    pub color: Option<String>,
}

impl ChatUser {
    /// Creates a user with only its identity known.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            display_name: name.clone(),
            name,
            color: None,
        }
    }

    pub fn from_model(model: &ChatUserModel) -> Self {
        let mut user = Self::new(model.id, model.name.clone());
        user.update(model);
        user
    }

    pub fn update(&mut self, model: &ChatUserModel) {
        self.name.clone_from(&model.name);
        self.display_name = model
            .display_name
            .clone()
            .unwrap_or_else(|| model.name.clone());
        self.color.clone_from(&model.color);
    }
}

impl Entity for ChatUser {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}

// == REST User ==
/// A user as returned by the Helix REST API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestUser {
    pub id: u64,
    pub name: Option<String>,
    pub username: Option<String>,
    pub kind: Option<String>,
    pub broadcaster_type: Option<String>,
    pub description: Option<String>,
    pub profile_image_url: Option<String>,
    pub offline_image_url: Option<String>,
    pub view_count: Option<u64>,
}

impl RestUser {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn from_model(model: &HelixUser) -> Self {
        let mut user = Self::new(model.id);
        user.update(model);
        user
    }

    /// Copies every field the model specifies; omitted fields keep their value.
    pub fn update(&mut self, model: &HelixUser) {
        fn apply<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
            if source.is_some() {
                target.clone_from(source);
            }
        }

        apply(&mut self.name, &model.name);
        apply(&mut self.username, &model.username);
        apply(&mut self.kind, &model.kind);
        apply(&mut self.broadcaster_type, &model.broadcaster_type);
        apply(&mut self.description, &model.description);
        apply(&mut self.profile_image_url, &model.profile_image_url);
        apply(&mut self.offline_image_url, &model.offline_image_url);
        apply(&mut self.view_count, &model.view_count);
    }
}

impl Entity for RestUser {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}
