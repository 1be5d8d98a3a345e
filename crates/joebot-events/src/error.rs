//! Error types for event assembly.
//!
//! [`SubmissionError`] and the reply-worthy [`EventError`] variants display
//! as the exact text shown back to the member who submitted the form.

use thiserror::Error;

/// Startup configuration problems. Fatal: surfaced once before serving.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JOEBOT_TIMEZONE is not a known IANA timezone: '{0}'")]
    InvalidTimezone(String),

    #[error("JOEBOT_FORM_TIMEOUT_SECS must be a positive whole number of seconds: '{0}'")]
    InvalidTimeout(String),
}

/// A submitted form that cannot become an event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Unable to parse date for {0}")]
    UnparseableDate(String),

    #[error("Shortname must only contain lowercase characters, numbers, and dashes")]
    InvalidShortname,

    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Failure reported by a storage backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("storage error: {0}")]
pub struct StoreError(pub String);

/// Failure reported by the chat platform when creating a channel or thread.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ProvisionError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Error: Not in a guild")]
    NotInGuild,

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Error: Unable to create channel")]
    Provisioning(#[source] ProvisionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EventError>;
