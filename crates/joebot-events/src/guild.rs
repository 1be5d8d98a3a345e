//! Per-community settings: the default parent for new event channels.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::ids::{GuildId, ParentChannel};

/// Storage for per-community settings.
pub trait GuildStore {
    fn default_parent(&self, guild: GuildId) -> Result<Option<ParentChannel>, StoreError>;

    /// Set or clear (`None`) the default parent, creating the community's
    /// record if it has none yet.
    fn set_default_parent(
        &mut self,
        guild: GuildId,
        parent: Option<ParentChannel>,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryGuildStore {
    parents: HashMap<GuildId, ParentChannel>,
}

impl MemoryGuildStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GuildStore for MemoryGuildStore {
    fn default_parent(&self, guild: GuildId) -> Result<Option<ParentChannel>, StoreError> {
        Ok(self.parents.get(&guild).copied())
    }

    fn set_default_parent(
        &mut self,
        guild: GuildId,
        parent: Option<ParentChannel>,
    ) -> Result<(), StoreError> {
        match parent {
            Some(p) => self.parents.insert(guild, p),
            None => self.parents.remove(&guild),
        };
        Ok(())
    }
}

pub const GUILD_ONLY_REPLY: &str = "This command can only be run within a guild";
const NO_DEFAULT_REPLY: &str =
    "There is currently no default category. Events will be created under the server root.";
const CLEARED_REPLY: &str =
    "Default category cleared. Events will be created under the server root.";

/// The moderator `category` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryCommand {
    Get,
    Set(ParentChannel),
    Clear,
}

impl CategoryCommand {
    /// Run the subcommand and return the reply text.
    pub fn execute<G: GuildStore>(
        &self,
        store: &mut G,
        guild: Option<GuildId>,
    ) -> Result<String, StoreError> {
        let Some(guild) = guild else {
            return Ok(GUILD_ONLY_REPLY.to_string());
        };
        let reply = match self {
            CategoryCommand::Get => match store.default_parent(guild)? {
                Some(parent) => format!(
                    "The default category for events is currently {}",
                    parent.id
                ),
                None => NO_DEFAULT_REPLY.to_string(),
            },
            CategoryCommand::Clear => {
                store.set_default_parent(guild, None)?;
                tracing::info!(%guild, "default event parent cleared");
                CLEARED_REPLY.to_string()
            }
            CategoryCommand::Set(parent) => {
                store.set_default_parent(guild, Some(*parent))?;
                tracing::info!(%guild, parent = parent.id.0, "default event parent set");
                format!("The default category for events is now {}", parent.id)
            }
        };
        Ok(reply)
    }
}
