//! Stored event records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ids::{ChannelId, GuildId};

/// An event as persisted once its channel exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: u64,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub location: String,
    pub description: String,
}

/// An event ready to store; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub location: String,
    pub description: String,
}

impl NewEvent {
    pub fn with_id(self, id: u64) -> Event {
        Event {
            id,
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            title: self.title,
            start: self.start,
            location: self.location,
            description: self.description,
        }
    }
}
