//! Where a new event's discussion space is created.

use serde::Serialize;

use crate::ids::{ChannelId, ChannelKind, ParentChannel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelPlacement {
    /// A public thread inside a text channel.
    PublicThread { parent: ChannelId },
    /// A text channel, under a category or at the server root.
    TextChannel { category: Option<ChannelId> },
}

impl ChannelPlacement {
    /// A parent given on the command wins over the community default.
    pub fn plan(explicit: Option<ParentChannel>, guild_default: Option<ParentChannel>) -> Self {
        let placement = match explicit.or(guild_default) {
            Some(ParentChannel {
                id,
                kind: ChannelKind::Text,
            }) => ChannelPlacement::PublicThread { parent: id },
            Some(ParentChannel {
                id,
                kind: ChannelKind::Category,
            }) => ChannelPlacement::TextChannel { category: Some(id) },
            None => ChannelPlacement::TextChannel { category: None },
        };
        tracing::debug!(?explicit, ?guild_default, ?placement, "placement planned");
        placement
    }

    pub fn is_thread(&self) -> bool {
        matches!(self, ChannelPlacement::PublicThread { .. })
    }
}
