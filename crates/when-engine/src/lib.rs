//! # when-engine
//!
//! Deterministic resolution of casual date/time phrases for event scheduling.
//!
//! Given a reference instant and an IANA timezone, the engine turns text such
//! as `"Friday 7"`, `"tomorrow at 2pm"` or `"Fri, Mar 8, 7:00 PM"` into an
//! absolute instant, and renders instants back into that same editable form.
//!
//! ## Modules
//!
//! - [`grammar`]: Text → date/time phrase candidates (pluggable via [`Grammar`])
//! - [`refine`]: The evening rule for unmarked hours 1–8
//! - [`forward`]: Fill in missing fields, picking the nearest occurrence at or after now
//! - [`resolver`]: The full pipeline: standalone parsing, prose extraction, display formatting
//! - [`context`]: Reference instant and timezone
//! - [`candidate`]: Grammar output types
//! - [`error`]: Error types

pub mod candidate;
pub mod context;
pub mod error;
pub mod forward;
pub mod grammar;
pub mod refine;
pub mod resolver;

pub use candidate::{
    Meridiem, OffsetUnit, ParseCandidate, PartialDateTime, RelativeOffset, WeekdayRef,
};
pub use context::{parse_rfc3339, parse_timezone, ReferenceContext};
pub use error::WhenError;
pub use grammar::{CasualGrammar, Grammar};
pub use refine::apply_meridiem_rule;
pub use resolver::{
    extract_from_prose, format, parse_standalone, DateTimeResolver, Extraction, ResolvedInstant,
    DISPLAY_FORMAT,
};
