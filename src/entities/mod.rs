//! Entities Module
//!
//! Typed wrappers over chat and REST objects. Each entity is created from an
//! API model and refreshed in place through `update`.

mod channel;
mod community;
mod message;
pub mod model;
mod user;

pub use channel::ChatChannel;
pub use community::Community;
pub use message::{ChatMessage, UserState};
pub use user::{ChatUser, RestUser};

/// An object with a natural identifying key.
pub trait Entity {
    type Key;

    fn key(&self) -> Self::Key;
}
