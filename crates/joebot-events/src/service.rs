//! Event creation: validate, place, provision, store.

use serde::Serialize;
use when_engine::ReferenceContext;

use crate::embed::EventEmbed;
use crate::error::{EventError, ProvisionError, Result, StoreError};
use crate::event::{Event, NewEvent};
use crate::guild::GuildStore;
use crate::ids::{ChannelId, GuildId, ParentChannel};
use crate::placement::ChannelPlacement;
use crate::submission::EventSubmission;

/// Storage for event records.
pub trait EventStore {
    fn insert(&mut self, event: NewEvent) -> std::result::Result<Event, StoreError>;
    fn get(&self, id: u64) -> std::result::Result<Option<Event>, StoreError>;
}

/// The chat platform's channel and thread creation.
pub trait ChannelProvisioner {
    fn provision(
        &mut self,
        guild: GuildId,
        name: &str,
        placement: &ChannelPlacement,
    ) -> std::result::Result<ChannelId, ProvisionError>;
}

/// A submitted form plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    pub guild: Option<GuildId>,
    /// Parent channel given on the command, if any.
    pub parent: Option<ParentChannel>,
    pub submission: EventSubmission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedEvent {
    pub event: Event,
    pub placement: ChannelPlacement,
    pub embed: EventEmbed,
}

pub struct EventService<S, P, G> {
    events: S,
    channels: P,
    guilds: G,
}

impl<S, P, G> EventService<S, P, G>
where
    S: EventStore,
    P: ChannelProvisioner,
    G: GuildStore,
{
    pub fn new(events: S, channels: P, guilds: G) -> Self {
        Self {
            events,
            channels,
            guilds,
        }
    }

    pub fn events(&self) -> &S {
        &self.events
    }

    pub fn channels(&self) -> &P {
        &self.channels
    }

    pub fn guilds(&self) -> &G {
        &self.guilds
    }

    pub fn guilds_mut(&mut self) -> &mut G {
        &mut self.guilds
    }

    /// Create an event from a submitted form.
    ///
    /// `ctx` must be the context the form was prefilled with. Nothing is
    /// provisioned or stored unless the submission validates.
    pub fn create(
        &mut self,
        request: CreateEventRequest,
        ctx: &ReferenceContext,
    ) -> Result<CreatedEvent> {
        let draft = request.submission.validate(ctx).inspect_err(|e| {
            tracing::warn!(error = %e, "event submission rejected");
        })?;
        let guild = request.guild.ok_or(EventError::NotInGuild)?;

        let guild_default = self.guilds.default_parent(guild)?;
        let placement = ChannelPlacement::plan(request.parent, guild_default);

        let channel_id = self
            .channels
            .provision(guild, &draft.shortname, &placement)
            .map_err(|e| {
                tracing::warn!(%guild, error = %e, "channel provisioning failed");
                EventError::Provisioning(e)
            })?;

        let event = self
            .events
            .insert(NewEvent {
                guild_id: guild,
                channel_id,
                title: draft.title,
                start: draft.start.utc(),
                location: draft.location,
                description: draft.description,
            })
            .inspect_err(|e| {
                tracing::warn!(
                    %guild,
                    channel = channel_id.0,
                    error = %e,
                    "event not stored; provisioned channel is orphaned"
                );
            })?;
        tracing::info!(
            event_id = event.id,
            %guild,
            channel = channel_id.0,
            start = %event.start,
            "event created"
        );

        Ok(CreatedEvent {
            embed: EventEmbed::for_event(&event),
            event,
            placement,
        })
    }
}

/// Events kept in memory, with ids assigned from 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Vec<Event>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }
}

impl EventStore for MemoryEventStore {
    fn insert(&mut self, event: NewEvent) -> std::result::Result<Event, StoreError> {
        let id = self.events.len() as u64 + 1;
        let event = event.with_id(id);
        self.events.push(event.clone());
        Ok(event)
    }

    fn get(&self, id: u64) -> std::result::Result<Option<Event>, StoreError> {
        Ok(self.events.iter().find(|e| e.id == id).cloned())
    }
}

/// A channel created by [`MemoryChannelProvisioner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedChannel {
    pub id: ChannelId,
    pub guild: GuildId,
    pub name: String,
    pub placement: ChannelPlacement,
}

/// Hands out sequential channel ids and records what was asked for.
#[derive(Debug, Clone)]
pub struct MemoryChannelProvisioner {
    next_id: u64,
    created: Vec<ProvisionedChannel>,
}

impl MemoryChannelProvisioner {
    pub fn new(first_id: u64) -> Self {
        Self {
            next_id: first_id,
            created: Vec::new(),
        }
    }

    pub fn created(&self) -> &[ProvisionedChannel] {
        &self.created
    }
}

impl Default for MemoryChannelProvisioner {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ChannelProvisioner for MemoryChannelProvisioner {
    fn provision(
        &mut self,
        guild: GuildId,
        name: &str,
        placement: &ChannelPlacement,
    ) -> std::result::Result<ChannelId, ProvisionError> {
        let id = ChannelId(self.next_id);
        self.next_id += 1;
        self.created.push(ProvisionedChannel {
            id,
            guild,
            name: name.to_string(),
            placement: *placement,
        });
        Ok(id)
    }
}
