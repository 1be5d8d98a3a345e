//! Platform snowflake identifiers and parent channel references.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A community (guild) on the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuildId(pub u64);

/// A channel, category, or thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl ChannelId {
    /// The platform's mention markup, e.g. `<#1234>`.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.0)
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Displays as a channel mention.
impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<#{}>", self.0)
    }
}

impl FromStr for GuildId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(GuildId)
    }
}

impl FromStr for ChannelId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ChannelId)
    }
}

/// The kinds of channel an event can be placed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Category,
    Text,
}

/// A channel chosen as the parent for new event channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentChannel {
    pub id: ChannelId,
    pub kind: ChannelKind,
}

impl ParentChannel {
    pub fn category(id: u64) -> Self {
        Self {
            id: ChannelId(id),
            kind: ChannelKind::Category,
        }
    }

    pub fn text(id: u64) -> Self {
        Self {
            id: ChannelId(id),
            kind: ChannelKind::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_displays_as_mention() {
        assert_eq!(ChannelId(42).to_string(), "<#42>");
        assert_eq!(ChannelId(42).mention(), "<#42>");
        assert_eq!(GuildId(7).to_string(), "7");
    }

    #[test]
    fn test_ids_parse_from_strings() {
        assert_eq!(" 1234 ".parse::<ChannelId>(), Ok(ChannelId(1234)));
        assert_eq!("99".parse::<GuildId>(), Ok(GuildId(99)));
        assert!("abc".parse::<ChannelId>().is_err());
    }

    #[test]
    fn test_ids_serialize_as_numbers() {
        let parent = ParentChannel::category(5);
        let json = serde_json::to_string(&parent).unwrap();
        assert_eq!(json, r#"{"id":5,"kind":"category"}"#);
    }
}
