//! # joebot-events
//!
//! Community event assembly around [`when_engine`]: the "Create Event" form,
//! validation of what members submit, where the event's discussion channel
//! goes, and the summary card posted afterwards.
//!
//! The chat platform and storage are traits ([`ChannelProvisioner`],
//! [`EventStore`], [`GuildStore`]); in-memory implementations are provided.
//!
//! ## Modules
//!
//! - [`config`]: Timezone and form timeout from the environment
//! - [`form`]: Form defaults and fields
//! - [`submission`]: Submitted form → validated draft
//! - [`placement`]: Thread vs. channel, under which parent
//! - [`embed`]: Summary card with timestamp and map links
//! - [`guild`]: Per-community default parent and its moderator command
//! - [`service`]: End-to-end event creation
//! - [`ids`], [`event`]: Identifiers and stored records
//! - [`error`]: Error types

pub mod config;
pub mod embed;
pub mod error;
pub mod event;
pub mod form;
pub mod guild;
pub mod ids;
pub mod placement;
pub mod service;
pub mod submission;

pub use config::BotConfig;
pub use embed::{EmbedField, EventEmbed};
pub use error::{ConfigError, EventError, ProvisionError, StoreError, SubmissionError};
pub use event::{Event, NewEvent};
pub use form::{CommandOptions, EventForm, EventFormDefaults, FieldStyle, FormField};
pub use guild::{CategoryCommand, GuildStore, MemoryGuildStore};
pub use ids::{ChannelId, ChannelKind, GuildId, ParentChannel};
pub use placement::ChannelPlacement;
pub use service::{
    ChannelProvisioner, CreateEventRequest, CreatedEvent, EventService, EventStore,
    MemoryChannelProvisioner, MemoryEventStore, ProvisionedChannel,
};
pub use submission::{EventDraft, EventSubmission};
