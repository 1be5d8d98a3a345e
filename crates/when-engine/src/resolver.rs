//! The resolution pipeline: grammar → evening rule → forward-biased day selection.

use std::ops::Range;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::candidate::ParseCandidate;
use crate::context::{truncate_to_minute, ReferenceContext};
use crate::forward;
use crate::grammar::{CasualGrammar, Grammar};
use crate::refine;

/// An absolute instant plus the zone its wall-clock fields were read in.
///
/// Always at minute precision: seconds and sub-seconds are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedInstant {
    utc: DateTime<Utc>,
    timezone: Tz,
}

impl ResolvedInstant {
    /// Wrap an instant read from elsewhere (a stored event, a timestamp),
    /// dropping seconds to keep minute precision.
    pub fn at(utc: DateTime<Utc>, timezone: Tz) -> Self {
        Self {
            utc: truncate_to_minute(utc),
            timezone,
        }
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn local(&self) -> DateTime<Tz> {
        self.utc.with_timezone(&self.timezone)
    }
}

/// A phrase found in prose and the instant it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// The exact substring of the input that was recognized.
    pub matched_text: String,
    /// Byte range of `matched_text` in the input.
    pub span: Range<usize>,
    pub resolved: ResolvedInstant,
}

impl Extraction {
    /// `source` with the matched phrase removed and whitespace collapsed.
    /// `source` must be the text this extraction came from.
    pub fn residual(&self, source: &str) -> String {
        let before = source.get(..self.span.start).unwrap_or_default();
        let after = source.get(self.span.end..).unwrap_or_default();
        before
            .split_whitespace()
            .chain(after.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Resolves free-form date/time text with a pluggable grammar.
///
/// The resolver holds no clock and no mutable state: every call takes its
/// reference frame from the [`ReferenceContext`] it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeResolver<G = CasualGrammar> {
    grammar: G,
}

impl<G: Grammar> DateTimeResolver<G> {
    pub fn new(grammar: G) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// Resolve text that is expected to hold only a date/time phrase.
    ///
    /// Returns `None` when no phrase is recognized.
    pub fn parse_standalone(&self, text: &str, ctx: &ReferenceContext) -> Option<ResolvedInstant> {
        let candidate = self.first_candidate(text)?;
        resolve_candidate(&candidate, ctx)
    }

    /// Find the leftmost date/time phrase in prose and resolve it.
    ///
    /// Returns `None` when the text holds no phrase at all.
    pub fn extract_from_prose(&self, text: &str, ctx: &ReferenceContext) -> Option<Extraction> {
        let candidate = self.first_candidate(text)?;
        let resolved = resolve_candidate(&candidate, ctx)?;
        Some(Extraction {
            matched_text: candidate.matched_text,
            span: candidate.span,
            resolved,
        })
    }

    /// Every phrase in `text`, each refined, in order of appearance.
    pub fn candidates(&self, text: &str) -> Vec<ParseCandidate> {
        self.grammar
            .scan(text)
            .into_iter()
            .map(refine::refine_candidate)
            .collect()
    }

    fn first_candidate(&self, text: &str) -> Option<ParseCandidate> {
        let candidate = self.grammar.scan(text).into_iter().next()?;
        let refined = refine::refine_candidate(candidate);
        tracing::trace!(
            matched = %refined.matched_text,
            components = ?refined.components,
            "date phrase found"
        );
        Some(refined)
    }
}

fn resolve_candidate(candidate: &ParseCandidate, ctx: &ReferenceContext) -> Option<ResolvedInstant> {
    let utc = forward::resolve(&candidate.components, ctx)?;
    Some(ResolvedInstant {
        utc,
        timezone: ctx.timezone(),
    })
}

/// Display pattern: abbreviated weekday and month, day, 12-hour time.
pub const DISPLAY_FORMAT: &str = "%a, %b %-d, %-I:%M %p";

/// Render an instant for display and re-editing, e.g. `"Fri, Mar 8, 7:00 PM"`,
/// in the context's timezone. `None` renders as the empty string.
///
/// Feeding the output back through [`parse_standalone`] with the same context
/// gives the same minute for instants within a year after `now`.
pub fn format(instant: Option<&ResolvedInstant>, ctx: &ReferenceContext) -> String {
    match instant {
        Some(instant) => instant
            .utc()
            .with_timezone(&ctx.timezone())
            .format(DISPLAY_FORMAT)
            .to_string(),
        None => String::new(),
    }
}

/// [`DateTimeResolver::parse_standalone`] with the default grammar.
pub fn parse_standalone(text: &str, ctx: &ReferenceContext) -> Option<ResolvedInstant> {
    DateTimeResolver::<CasualGrammar>::default().parse_standalone(text, ctx)
}

/// [`DateTimeResolver::extract_from_prose`] with the default grammar.
pub fn extract_from_prose(text: &str, ctx: &ReferenceContext) -> Option<Extraction> {
    DateTimeResolver::<CasualGrammar>::default().extract_from_prose(text, ctx)
}
