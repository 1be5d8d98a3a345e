//! Error types for when-engine operations.
//!
//! Failing to find a date in some text is not an error; resolution returns
//! `None` for that. These variants cover bad configuration and malformed
//! machine-readable input only.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhenError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, WhenError>;
