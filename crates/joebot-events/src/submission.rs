//! Validation of a submitted event form.

use serde::{Deserialize, Serialize};
use when_engine::{ReferenceContext, ResolvedInstant};

use crate::error::SubmissionError;

/// Raw field values from a submitted form, as the member typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubmission {
    pub title: String,
    pub shortname: String,
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub shortname: String,
    pub start: ResolvedInstant,
    pub location: String,
    pub description: String,
}

impl EventSubmission {
    /// Check required fields, resolve the date, then check the channel name.
    ///
    /// `ctx` must be the context the form was prefilled with, so a relative
    /// date reads the same on both sides of the form.
    pub fn validate(&self, ctx: &ReferenceContext) -> Result<EventDraft, SubmissionError> {
        for (name, value) in [
            ("title", &self.title),
            ("shortname", &self.shortname),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(SubmissionError::MissingField(name));
            }
        }

        let start = when_engine::parse_standalone(&self.date, ctx)
            .ok_or_else(|| SubmissionError::UnparseableDate(self.date.clone()))?;

        if !is_valid_shortname(&self.shortname) {
            return Err(SubmissionError::InvalidShortname);
        }

        Ok(EventDraft {
            title: self.title.trim().to_string(),
            shortname: self.shortname.clone(),
            start,
            location: self.location.trim().to_string(),
            description: self.description.clone(),
        })
    }
}

/// Channel names may only hold `a-z`, `0-9`, and `-`.
pub fn is_valid_shortname(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
