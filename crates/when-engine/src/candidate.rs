//! Grammar output: what a phrase said, before any defaults are filled in.

use std::ops::Range;

use chrono::Weekday;
use serde::Serialize;

/// Which half of the 12-hour clock an hour belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Meridiem {
    Am,
    Pm,
}

/// A weekday reference such as "Friday" or "next Friday".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayRef {
    pub weekday: Weekday,
    /// `true` for "next <weekday>", which never resolves to today.
    pub next: bool,
}

/// Unit of a relative offset ("in 3 days").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
}

/// A relative offset from now ("in 2 hours", "in a week").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeOffset {
    pub amount: i64,
    pub unit: OffsetUnit,
}

/// The sparse set of fields a phrase stated.
///
/// `hour` holds the clock reading as the grammar produced it: 0–23, where a
/// phrase with an explicit marker has already been converted ("7pm" is 19).
/// `meridiem` is `Some` exactly when the half of the day is known for certain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialDateTime {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub weekday: Option<WeekdayRef>,
    /// Days from today: today/tonight = 0, tomorrow = 1, yesterday = -1.
    pub day_offset: Option<i64>,
    pub offset: Option<RelativeOffset>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub meridiem: Option<Meridiem>,
    pub is_now: bool,
}

impl PartialDateTime {
    pub fn is_meridiem_known(&self) -> bool {
        self.meridiem.is_some()
    }

    /// Whether the phrase named a calendar date (as opposed to a weekday,
    /// relative day, or nothing at all).
    pub fn has_calendar_date(&self) -> bool {
        self.month.is_some() && self.day.is_some()
    }

    /// Whether the phrase carries any date information.
    pub fn has_date(&self) -> bool {
        self.has_calendar_date() || self.weekday.is_some() || self.day_offset.is_some()
    }

    pub fn has_time(&self) -> bool {
        self.hour.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_date() && !self.has_time() && self.offset.is_none() && !self.is_now
    }
}

/// One date/time phrase found in scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCandidate {
    /// The exact substring of the input recognized as the phrase.
    pub matched_text: String,
    /// Byte range of `matched_text` in the input.
    pub span: Range<usize>,
    pub components: PartialDateTime,
}
