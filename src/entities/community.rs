//! Community entity.

use std::fmt;

use serde::Serialize;

use super::model::CommunityModel;
use super::Entity;

/// A REST community. Two communities are equal when their ids match.
#[derive(Debug, Clone, Serialize)]
pub struct Community {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl Community {
    pub fn from_model(model: &CommunityModel) -> Self {
        let mut community = Self {
            id: model.id.clone(),
            name: String::new(),
            avatar_url: None,
        };
        community.update(model);
        community
    }

    pub fn update(&mut self, model: &CommunityModel) {
        self.name.clone_from(&model.name);
        self.avatar_url.clone_from(&model.avatar_image_url);
    }

    /// Refreshes this community from another snapshot of it.
    pub fn update_from(&mut self, other: &Community) {
        self.name.clone_from(&other.name);
        self.avatar_url.clone_from(&other.avatar_url);
    }
}

impl PartialEq for Community {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Community {}

impl fmt::Display for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Entity for Community {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}
