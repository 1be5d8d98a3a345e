//! Phrase grammar: find date/time phrases in text and report what they state.
//!
//! The grammar only extracts. It fills in nothing the phrase did not say and
//! never looks at a clock; defaults and day selection happen in
//! [`crate::forward`], the evening rule in [`crate::refine`].
//!
//! # Recognized phrases
//!
//! **Relative days**: `"today"`, `"tonight"`, `"tomorrow"` (`"tmr"`, `"tmrw"`), `"yesterday"`
//!
//! **Weekdays**: `"Friday"`, `"this Friday"`, `"next Friday"`. Abbreviations
//! (`"fri"`, `"sat"`, ...) only count next to another date or time part, so
//! prose like "we sat down" is left alone.
//!
//! **Calendar dates**: `"March 8"`, `"Mar 8th, 2024"`, `"8 March"`,
//! `"8th of March 2024"`, `"3/8"`, `"3/8/24"`, `"2024-03-08"`
//!
//! **Times**: `"7pm"`, `"7 pm"`, `"7:30"`, `"7:30 p.m."`, `"19:00"`, `"noon"`,
//! `"midnight"`, ranges `"7-9pm"` / `"7 to 9pm"` (start only). A bare hour
//! such as `"7"` needs an anchor: `"at 7"`, `"Friday 7"`, `"7 tomorrow"`, or
//! `"7"` as the entire input.
//!
//! **Day periods**: `"morning"`, `"afternoon"`, `"evening"`, `"night"`, also
//! as `"in the evening"` / `"at night"`, attached to a date or time, or
//! leading one: `"this morning at 7"`, `"evening at 7:30"`
//!
//! **Offsets**: `"now"`, `"in 2 hours"`, `"in 30 mins"`, `"in 3 days"`, `"in a week"`
//!
//! **Combined**: `"tomorrow at 2pm"`, `"Friday 7"`, `"7pm on Friday"`,
//! `"Fri, Mar 8, 7:00 PM"`, `"tonight at 8"`, `"next Tuesday evening"`

use chrono::{Datelike, NaiveDate, Weekday};

use crate::candidate::{
    Meridiem, OffsetUnit, ParseCandidate, PartialDateTime, RelativeOffset, WeekdayRef,
};

/// A strategy that finds date/time phrases in text.
///
/// Implementations must be pure: the same text always yields the same
/// candidates, ordered left to right and non-overlapping.
pub trait Grammar {
    fn scan(&self, text: &str) -> Vec<ParseCandidate>;
}

/// The default English casual-phrase grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct CasualGrammar;

impl Grammar for CasualGrammar {
    fn scan(&self, text: &str) -> Vec<ParseCandidate> {
        // ASCII lowercasing keeps byte offsets identical to `text`.
        let lower = text.to_ascii_lowercase();
        let tokens = tokenize(&lower);
        let whole_input = tokens.len() == 1;

        let mut candidates = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match parse_phrase(&tokens, i, whole_input) {
                Some((components, next)) if next > i && !components.is_empty() => {
                    let span = tokens[i].start..tokens[next - 1].end;
                    candidates.push(ParseCandidate {
                        matched_text: text[span.clone()].to_string(),
                        span,
                        components,
                    });
                    i = next;
                }
                _ => i += 1,
            }
        }
        candidates
    }
}

// ── Tokens ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    /// Lowercased, edge punctuation removed.
    text: &'a str,
    start: usize,
    end: usize,
}

const LEADING_PUNCT: &[char] = &['(', '[', '{', '"', '\'', '<'];
const TRAILING_PUNCT: &[char] = &[',', '.', ';', ':', '!', '?', ')', ']', '}', '"', '\'', '>'];

fn tokenize(lower: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (idx, ch) in lower.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                push_token(&mut tokens, lower, s, idx);
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        push_token(&mut tokens, lower, s, lower.len());
    }
    tokens
}

fn push_token<'a>(tokens: &mut Vec<Token<'a>>, lower: &'a str, start: usize, end: usize) {
    let raw = &lower[start..end];
    let lead_trimmed = raw.trim_start_matches(LEADING_PUNCT);
    let start = start + (raw.len() - lead_trimmed.len());

    let mut text = lead_trimmed;
    // Keep the final dot of "a.m." / "p.m.".
    while !(text.ends_with("a.m.") || text.ends_with("p.m.")) {
        match text.chars().last() {
            Some(c) if TRAILING_PUNCT.contains(&c) => text = &text[..text.len() - c.len_utf8()],
            _ => break,
        }
    }
    if text.is_empty() {
        return;
    }
    tokens.push(Token {
        text,
        start,
        end: start + text.len(),
    });
}

fn text_at<'a>(tokens: &[Token<'a>], i: usize) -> Option<&'a str> {
    tokens.get(i).map(|t| t.text)
}

// ── Phrase assembly ─────────────────────────────────────────────────────────

/// Try to read one phrase starting at token `start`. Returns the components
/// and the index one past the last consumed token.
fn parse_phrase(
    tokens: &[Token<'_>],
    start: usize,
    whole_input: bool,
) -> Option<(PartialDateTime, usize)> {
    let mut i = start;
    let mut anchored = whole_input;

    // A leading connector belongs to the phrase only if a phrase follows it.
    match text_at(tokens, i)? {
        "at" | "@" | "from" => {
            i += 1;
            anchored = true;
        }
        "on" => i += 1,
        _ => {}
    }

    if let Some(found) = parse_now_or_offset(tokens, i) {
        return Some(found);
    }

    let mut c = PartialDateTime::default();
    let mut period = None;

    if let Some((date, next)) = parse_date_part(tokens, i) {
        i = next;
        period = date.apply(&mut c);
        let abbreviated_weekday = matches!(date, DatePart::Weekday { abbreviated: true, .. });

        if let Some((p, next)) = parse_period(tokens, i) {
            period = Some(p);
            i = next;
        }

        let time_start = match text_at(tokens, i) {
            Some("at" | "@" | "from") => i + 1,
            _ => i,
        };
        if let Some((time, next)) = parse_time_part(tokens, time_start, true) {
            time.apply(&mut c);
            i = next;
            if period.is_none() {
                if let Some((p, next)) = parse_period(tokens, i) {
                    period = Some(p);
                    i = next;
                }
            }
        } else if abbreviated_weekday && period.is_none() {
            return None;
        }
    } else if let Some((p, this, next)) = parse_leading_period(tokens, i) {
        // "this morning at 7", "evening at 7:30 on Friday"
        i = next;
        period = Some(p);
        if this {
            c.day_offset = Some(0);
        }

        let time_start = match text_at(tokens, i) {
            Some("at" | "@") => i + 1,
            _ => i,
        };
        let anchored = this || time_start > i;
        match parse_time_part(tokens, time_start, anchored) {
            Some((time, next)) => {
                time.apply(&mut c);
                i = next;
            }
            None if this => {}
            None => return None,
        }

        if !this {
            let date_start = match text_at(tokens, i) {
                Some("on") => i + 1,
                _ => i,
            };
            if let Some((date, next)) = parse_date_part(tokens, date_start) {
                i = next;
                date.apply(&mut c);
            }
        }
    } else if let Some((time, next)) = parse_time_part(tokens, i, true) {
        let mut after_time = next;
        let mut time_period = None;
        if let Some((p, next)) = parse_period(tokens, after_time) {
            time_period = Some(p);
            after_time = next;
        }

        let date_start = match text_at(tokens, after_time) {
            Some("on") => after_time + 1,
            _ => after_time,
        };
        let date = parse_date_part(tokens, date_start);

        // A bare hour needs an anchor; a following date part is one ("7 Friday").
        if time.bare && !anchored && date.is_none() {
            return None;
        }

        time.apply(&mut c);
        i = after_time;
        period = time_period;
        if let Some((date, next)) = date {
            i = next;
            if let Some(p) = date.apply(&mut c) {
                period.get_or_insert(p);
            }
        }
    } else {
        return None;
    }

    if let Some(p) = period {
        p.apply(&mut c);
    }
    Some((c, i))
}

// ── Offsets ─────────────────────────────────────────────────────────────────

fn parse_now_or_offset(tokens: &[Token<'_>], i: usize) -> Option<(PartialDateTime, usize)> {
    match text_at(tokens, i)? {
        "now" => Some((
            PartialDateTime {
                is_now: true,
                ..Default::default()
            },
            i + 1,
        )),
        "in" => {
            let amount = match text_at(tokens, i + 1)? {
                "a" | "an" | "one" => 1,
                n => parse_small_number(n)?,
            };
            let unit = parse_offset_unit(text_at(tokens, i + 2)?)?;
            Some((
                PartialDateTime {
                    offset: Some(RelativeOffset { amount, unit }),
                    ..Default::default()
                },
                i + 3,
            ))
        }
        _ => None,
    }
}

fn parse_offset_unit(s: &str) -> Option<OffsetUnit> {
    match s {
        "minute" | "minutes" | "min" | "mins" => Some(OffsetUnit::Minutes),
        "hour" | "hours" | "hr" | "hrs" => Some(OffsetUnit::Hours),
        "day" | "days" => Some(OffsetUnit::Days),
        "week" | "weeks" | "wk" | "wks" => Some(OffsetUnit::Weeks),
        _ => None,
    }
}

fn parse_small_number(s: &str) -> Option<i64> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ── Date parts ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatePart {
    Relative {
        days: i64,
        period: Option<DayPeriod>,
    },
    Weekday {
        weekday: WeekdayRef,
        abbreviated: bool,
    },
    Calendar {
        year: Option<i32>,
        month: u32,
        day: u32,
    },
}

impl DatePart {
    /// Copy the date fields into `c`, returning any day period the date implies.
    fn apply(self, c: &mut PartialDateTime) -> Option<DayPeriod> {
        match self {
            DatePart::Relative { days, period } => {
                c.day_offset = Some(days);
                period
            }
            DatePart::Weekday { weekday, .. } => {
                c.weekday = Some(weekday);
                None
            }
            DatePart::Calendar { year, month, day } => {
                c.year = year;
                c.month = Some(month);
                c.day = Some(day);
                None
            }
        }
    }
}

fn parse_date_part(tokens: &[Token<'_>], i: usize) -> Option<(DatePart, usize)> {
    let first = text_at(tokens, i)?;

    let relative = match first {
        "today" => Some((0, None)),
        "tonight" => Some((0, Some(DayPeriod::Night))),
        "tomorrow" | "tmr" | "tmrw" => Some((1, None)),
        "yesterday" => Some((-1, None)),
        _ => None,
    };
    if let Some((days, period)) = relative {
        return Some((DatePart::Relative { days, period }, i + 1));
    }

    let (next, weekday_at) = match first {
        "next" => (true, i + 1),
        "this" => (false, i + 1),
        _ => (false, i),
    };
    if let Some((weekday, abbreviated)) = text_at(tokens, weekday_at).and_then(parse_weekday) {
        let after = weekday_at + 1;
        // "Fri, Mar 8": the explicit date wins over the weekday.
        if let Some(found) = parse_calendar(tokens, after) {
            return Some(found);
        }
        let part = DatePart::Weekday {
            weekday: WeekdayRef { weekday, next },
            abbreviated,
        };
        return Some((part, after));
    }

    parse_calendar(tokens, i)
}

fn parse_calendar(tokens: &[Token<'_>], i: usize) -> Option<(DatePart, usize)> {
    let first = text_at(tokens, i)?;

    if let Some((year, month, day)) = parse_numeric_date(first) {
        return Some((DatePart::Calendar { year, month, day }, i + 1));
    }

    // "March 8", "Mar 8th 2024"
    if let Some(month) = parse_month(first) {
        let day = parse_day_number(text_at(tokens, i + 1)?)?;
        return finish_calendar(tokens, i + 2, month, day);
    }

    // "8 March", "8th of March 2024"
    let day = parse_day_number(first)?;
    let month_at = if text_at(tokens, i + 1) == Some("of") {
        i + 2
    } else {
        i + 1
    };
    let month = parse_month(text_at(tokens, month_at)?)?;
    finish_calendar(tokens, month_at + 1, month, day)
}

fn finish_calendar(
    tokens: &[Token<'_>],
    i: usize,
    month: u32,
    day: u32,
) -> Option<(DatePart, usize)> {
    let (year, next) = match text_at(tokens, i).and_then(parse_year) {
        Some(y) => (Some(y), i + 1),
        None => (None, i),
    };
    if !is_valid_date(year, month, day) {
        return None;
    }
    Some((DatePart::Calendar { year, month, day }, next))
}

/// "3/8", "3/8/2024", "3/8/24", "2024-03-08".
fn parse_numeric_date(s: &str) -> Option<(Option<i32>, u32, u32)> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some((Some(date.year()), date.month(), date.day()));
    }

    let parts: Vec<&str> = s.split('/').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    let month = parse_digits(parts[0], 2)?;
    let day = parse_digits(parts[1], 2)?;
    let year = match parts.get(2) {
        Some(y) if y.len() == 2 => Some(2000 + parse_digits(y, 2)? as i32),
        Some(y) => Some(parse_year(y)?),
        None => None,
    };
    is_valid_date(year, month, day).then_some((year, month, day))
}

fn is_valid_date(year: Option<i32>, month: u32, day: u32) -> bool {
    // Without a year, allow Feb 29 by checking against a leap year.
    NaiveDate::from_ymd_opt(year.unwrap_or(2000), month, day).is_some()
}

fn parse_digits(s: &str, max_len: usize) -> Option<u32> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a day of month: "8", "08", "8th", "1st", "22nd", "3rd".
fn parse_day_number(s: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| s.strip_suffix(suffix))
        .unwrap_or(s);
    let day = parse_digits(digits, 2)?;
    (1..=31).contains(&day).then_some(day)
}

/// Parse a weekday name. The flag is `true` for abbreviations.
fn parse_weekday(s: &str) -> Option<(Weekday, bool)> {
    match s {
        "monday" => Some((Weekday::Mon, false)),
        "tuesday" => Some((Weekday::Tue, false)),
        "wednesday" => Some((Weekday::Wed, false)),
        "thursday" => Some((Weekday::Thu, false)),
        "friday" => Some((Weekday::Fri, false)),
        "saturday" => Some((Weekday::Sat, false)),
        "sunday" => Some((Weekday::Sun, false)),
        "mon" => Some((Weekday::Mon, true)),
        "tue" | "tues" => Some((Weekday::Tue, true)),
        "wed" | "weds" => Some((Weekday::Wed, true)),
        "thu" | "thur" | "thurs" => Some((Weekday::Thu, true)),
        "fri" => Some((Weekday::Fri, true)),
        "sat" => Some((Weekday::Sat, true)),
        "sun" => Some((Weekday::Sun, true)),
        _ => None,
    }
}

/// Parse a month name to number (1-12).
fn parse_month(s: &str) -> Option<u32> {
    match s {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

// ── Day periods ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    fn default_hour(self) -> u32 {
        match self {
            DayPeriod::Morning => 9,
            DayPeriod::Afternoon => 13,
            DayPeriod::Evening => 18,
            DayPeriod::Night => 21,
        }
    }

    fn meridiem(self) -> Meridiem {
        match self {
            DayPeriod::Morning => Meridiem::Am,
            _ => Meridiem::Pm,
        }
    }

    /// Supply the period's hour, or settle the half of the day of an hour
    /// that was stated without a marker.
    fn apply(self, c: &mut PartialDateTime) {
        match c.hour {
            None => {
                c.hour = Some(self.default_hour());
                c.minute = Some(0);
                c.meridiem = Some(self.meridiem());
            }
            Some(hour) if c.meridiem.is_none() && (1..=12).contains(&hour) => {
                c.hour = Some(to_24_hour(hour, self.meridiem()));
                c.meridiem = Some(self.meridiem());
            }
            Some(_) => {}
        }
    }
}

fn parse_period(tokens: &[Token<'_>], i: usize) -> Option<(DayPeriod, usize)> {
    let word = |s: &str| match s {
        "morning" => Some(DayPeriod::Morning),
        "afternoon" => Some(DayPeriod::Afternoon),
        "evening" => Some(DayPeriod::Evening),
        "night" => Some(DayPeriod::Night),
        _ => None,
    };
    match text_at(tokens, i)? {
        "in" if text_at(tokens, i + 1) == Some("the") => {
            Some((word(text_at(tokens, i + 2)?)?, i + 3))
        }
        "at" if text_at(tokens, i + 1) == Some("night") => Some((DayPeriod::Night, i + 2)),
        s => Some((word(s)?, i + 1)),
    }
}

/// A period that opens a phrase: `"morning"`, `"this evening"`. The flag is
/// `true` when `"this"` pins the period to today.
fn parse_leading_period(tokens: &[Token<'_>], i: usize) -> Option<(DayPeriod, bool, usize)> {
    let (this, at) = match text_at(tokens, i)? {
        "this" => (true, i + 1),
        _ => (false, i),
    };
    let (period, next) = parse_period(tokens, at)?;
    Some((period, this, next))
}

// ── Times ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimePart {
    /// 0–23 once a marker has been applied; otherwise the clock reading.
    hour: u32,
    minute: u32,
    meridiem: Option<Meridiem>,
    /// An am/pm marker was written (as opposed to inferred from a 24-hour reading).
    has_marker: bool,
    /// Colon-less and marker-less, e.g. the "7" in "Friday 7".
    bare: bool,
}

impl TimePart {
    fn apply(self, c: &mut PartialDateTime) {
        c.hour = Some(self.hour);
        c.minute = Some(self.minute);
        c.meridiem = self.meridiem;
    }

    /// Attach a separately written am/pm marker. Fails for 24-hour readings
    /// and times that already carry a marker.
    fn with_marker(self, meridiem: Meridiem) -> Option<TimePart> {
        if self.has_marker || !(1..=12).contains(&self.hour) {
            return None;
        }
        Some(TimePart {
            hour: to_24_hour(self.hour, meridiem),
            meridiem: Some(meridiem),
            has_marker: true,
            bare: false,
            ..self
        })
    }
}

fn to_24_hour(hour12: u32, meridiem: Meridiem) -> u32 {
    match (hour12, meridiem) {
        (12, Meridiem::Am) => 0,
        (12, Meridiem::Pm) => 12,
        (h, Meridiem::Am) => h,
        (h, Meridiem::Pm) => h + 12,
    }
}

fn parse_marker(s: &str) -> Option<Meridiem> {
    match s {
        "am" | "a.m." | "a.m" => Some(Meridiem::Am),
        "pm" | "p.m." | "p.m" => Some(Meridiem::Pm),
        _ => None,
    }
}

fn is_range_separator(s: &str) -> bool {
    matches!(s, "-" | "–" | "to" | "until" | "till")
}

/// Parse a time or time range at `i`. Only the start of a range is returned.
fn parse_time_part(
    tokens: &[Token<'_>],
    i: usize,
    anchored: bool,
) -> Option<(TimePart, usize)> {
    let first = text_at(tokens, i)?;

    match first {
        "noon" | "midday" => return Some((fixed_time(12, Meridiem::Pm), i + 1)),
        "midnight" => return Some((fixed_time(0, Meridiem::Am), i + 1)),
        _ => {}
    }

    // "7-9pm", "7pm-9pm" in a single token.
    let (mut start, mut end, mut next) = match split_inline_range(first) {
        Some((start, end)) => (start, Some(end), i + 1),
        None => (parse_clock(first)?, None, i + 1),
    };

    // "7 pm" / "7-9 pm": a separate marker binds to the last clock read.
    if let Some(marker) = text_at(tokens, next).and_then(parse_marker) {
        let target = end.unwrap_or(start);
        if let Some(marked) = target.with_marker(marker) {
            match end {
                Some(_) => end = Some(marked),
                None => start = marked,
            }
            next += 1;
        }
    }

    // "7 to 9pm", "7 - 9 pm"
    if end.is_none() && text_at(tokens, next).is_some_and(is_range_separator) {
        if let Some(mut range_end) = text_at(tokens, next + 1).and_then(parse_clock) {
            let mut after = next + 2;
            if let Some(marker) = text_at(tokens, after).and_then(parse_marker) {
                if let Some(marked) = range_end.with_marker(marker) {
                    range_end = marked;
                    after += 1;
                }
            }
            end = Some(range_end);
            next = after;
        }
    }

    if let Some(range_end) = end {
        start = inherit_range_meridiem(start, range_end);
    }

    if start.bare && !anchored {
        return None;
    }
    Some((start, next))
}

fn fixed_time(hour: u32, meridiem: Meridiem) -> TimePart {
    TimePart {
        hour,
        minute: 0,
        meridiem: Some(meridiem),
        has_marker: true,
        bare: false,
    }
}

fn split_inline_range(s: &str) -> Option<(TimePart, TimePart)> {
    let (left, right) = s.split_once('-').or_else(|| s.split_once('–'))?;
    Some((parse_clock(left)?, parse_clock(right)?))
}

/// An unmarked range start takes its half of the day from a marked end:
/// "7-9pm" starts at 19:00, "11-1pm" at 11:00, "12-2pm" at noon.
fn inherit_range_meridiem(start: TimePart, end: TimePart) -> TimePart {
    let Some(end_meridiem) = end.meridiem else {
        return start;
    };
    if start.meridiem.is_some() || !(1..=12).contains(&start.hour) {
        return start;
    }
    let end_hour12 = match end.hour % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if start.hour % 12 < end_hour12 % 12 {
        end_meridiem
    } else {
        match end_meridiem {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    };
    TimePart {
        hour: to_24_hour(start.hour, meridiem),
        meridiem: Some(meridiem),
        bare: false,
        ..start
    }
}

/// Parse a single clock reading: "7", "7pm", "7:30", "7:30p.m.", "19:00", "07:30".
fn parse_clock(s: &str) -> Option<TimePart> {
    let (body, marker) = ["a.m.", "p.m.", "a.m", "p.m", "am", "pm"]
        .iter()
        .find_map(|m| s.strip_suffix(m).map(|body| (body, parse_marker(m))))
        .unwrap_or((s, None));

    let (hour_str, minute_str) = match body.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (body, None),
    };
    let hour = parse_digits(hour_str, 2)?;
    let minute = match minute_str {
        Some(m) if m.len() == 2 => parse_digits(m, 2)?,
        Some(_) => return None,
        None => 0,
    };
    if minute > 59 {
        return None;
    }

    if let Some(meridiem) = marker {
        if !(1..=12).contains(&hour) {
            return None;
        }
        return Some(TimePart {
            hour: to_24_hour(hour, meridiem),
            minute,
            meridiem: Some(meridiem),
            has_marker: true,
            bare: false,
        });
    }

    if hour > 23 {
        return None;
    }
    // 24-hour readings settle the half of the day: "19:00", "00:15", "07:30".
    let zero_padded = minute_str.is_some() && hour_str.len() == 2 && hour_str.starts_with('0');
    let meridiem = if hour == 0 || hour >= 13 || zero_padded {
        Some(if hour >= 12 { Meridiem::Pm } else { Meridiem::Am })
    } else {
        None
    };
    Some(TimePart {
        hour,
        minute,
        meridiem,
        has_marker: false,
        bare: minute_str.is_none(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<ParseCandidate> {
        CasualGrammar.scan(text)
    }

    fn first(text: &str) -> ParseCandidate {
        scan(text)
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("no phrase found in {text:?}"))
    }

    // ── Tokenizer ───────────────────────────────────────────────────────

    #[test]
    fn test_tokenize_strips_edge_punctuation_and_keeps_offsets() {
        let lower = "fri, mar 8, (7:00 pm)";
        let tokens = tokenize(lower);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["fri", "mar", "8", "7:00", "pm"]);
        for t in &tokens {
            assert_eq!(&lower[t.start..t.end], t.text);
        }
    }

    #[test]
    fn test_tokenize_keeps_dotted_marker() {
        let tokens = tokenize("7:30 p.m.");
        assert_eq!(tokens[1].text, "p.m.");
    }

    #[test]
    fn test_tokenize_drops_pure_punctuation() {
        let tokens = tokenize("lunch ... friday");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["lunch", "friday"]);
    }

    // ── Clock readings ──────────────────────────────────────────────────

    #[test]
    fn test_clock_with_marker() {
        let t = parse_clock("7pm").unwrap();
        assert_eq!((t.hour, t.minute, t.meridiem), (19, 0, Some(Meridiem::Pm)));
        let t = parse_clock("12am").unwrap();
        assert_eq!(t.hour, 0);
        let t = parse_clock("12:15pm").unwrap();
        assert_eq!((t.hour, t.minute), (12, 15));
    }

    #[test]
    fn test_clock_without_marker_is_unknown_half() {
        let t = parse_clock("7").unwrap();
        assert_eq!((t.hour, t.meridiem, t.bare), (7, None, true));
        let t = parse_clock("7:30").unwrap();
        assert_eq!((t.hour, t.meridiem, t.bare), (7, None, false));
    }

    #[test]
    fn test_clock_24_hour_readings_are_known() {
        assert_eq!(parse_clock("19:00").unwrap().meridiem, Some(Meridiem::Pm));
        assert_eq!(parse_clock("07:30").unwrap().meridiem, Some(Meridiem::Am));
        assert_eq!(parse_clock("00:15").unwrap().meridiem, Some(Meridiem::Am));
    }

    #[test]
    fn test_clock_rejects_nonsense() {
        assert!(parse_clock("13pm").is_none());
        assert!(parse_clock("25").is_none());
        assert!(parse_clock("7:5").is_none());
        assert!(parse_clock("7:75").is_none());
        assert!(parse_clock("2024").is_none());
        assert!(parse_clock("seven").is_none());
    }

    // ── Phrases ─────────────────────────────────────────────────────────

    #[test]
    fn test_weekday_with_bare_hour() {
        let c = first("Friday 7");
        assert_eq!(c.matched_text, "Friday 7");
        assert_eq!(c.components.weekday.unwrap().weekday, Weekday::Fri);
        assert_eq!(c.components.hour, Some(7));
        assert_eq!(c.components.meridiem, None);
    }

    #[test]
    fn test_relative_day_with_time() {
        let c = first("Team sync tomorrow at 2pm in the lounge");
        assert_eq!(c.matched_text, "tomorrow at 2pm");
        assert_eq!(c.components.day_offset, Some(1));
        assert_eq!(c.components.hour, Some(14));
    }

    #[test]
    fn test_bare_number_in_prose_is_ignored() {
        assert!(scan("a team of 5 people").is_empty());
    }

    #[test]
    fn test_bare_number_as_whole_input() {
        let c = first("7");
        assert_eq!(c.components.hour, Some(7));
    }

    #[test]
    fn test_anchored_bare_hour() {
        let c = first("dinner at 7");
        assert_eq!(c.matched_text, "at 7");
        assert_eq!(c.components.hour, Some(7));
    }

    #[test]
    fn test_connector_without_phrase_is_not_consumed() {
        assert!(scan("meet at the lounge").is_empty());
    }

    #[test]
    fn test_abbreviated_weekday_needs_company() {
        assert!(scan("we sat down").is_empty());
        let c = first("sat 7pm");
        assert_eq!(c.components.weekday.unwrap().weekday, Weekday::Sat);
    }

    #[test]
    fn test_full_weekday_alone() {
        let c = first("see you Friday!");
        assert_eq!(c.matched_text, "Friday");
        assert_eq!(c.components.hour, None);
    }

    #[test]
    fn test_next_weekday_modifier() {
        let c = first("next tuesday evening");
        let w = c.components.weekday.unwrap();
        assert!(w.next);
        assert_eq!(w.weekday, Weekday::Tue);
        assert_eq!(c.components.hour, Some(18));
    }

    #[test]
    fn test_formatted_output_shape() {
        let c = first("Fri, Mar 8, 7:00 PM");
        assert_eq!(c.matched_text, "Fri, Mar 8, 7:00 PM");
        assert_eq!(c.components.month, Some(3));
        assert_eq!(c.components.day, Some(8));
        assert_eq!(c.components.weekday, None);
        assert_eq!(c.components.hour, Some(19));
        assert_eq!(c.components.meridiem, Some(Meridiem::Pm));
    }

    #[test]
    fn test_calendar_forms() {
        let c = first("March 8th, 2024");
        assert_eq!(
            (c.components.year, c.components.month, c.components.day),
            (Some(2024), Some(3), Some(8))
        );
        let c = first("8th of March");
        assert_eq!((c.components.month, c.components.day), (Some(3), Some(8)));
        let c = first("3/8/24");
        assert_eq!(c.components.year, Some(2024));
        let c = first("2024-03-08");
        assert_eq!(c.components.day, Some(8));
    }

    #[test]
    fn test_invalid_calendar_date_rejected() {
        assert!(scan("February 30").is_empty());
        assert!(scan("13/45").is_empty());
    }

    #[test]
    fn test_time_then_date() {
        let c = first("7pm on Friday");
        assert_eq!(c.matched_text, "7pm on Friday");
        assert_eq!(c.components.weekday.unwrap().weekday, Weekday::Fri);
        assert_eq!(c.components.hour, Some(19));
    }

    #[test]
    fn test_bare_hour_before_date() {
        let c = first("7 Friday");
        assert_eq!(c.matched_text, "7 Friday");
        assert_eq!(c.components.weekday.unwrap().weekday, Weekday::Fri);
        assert_eq!(c.components.hour, Some(7));

        let c = first("dinner 7 tomorrow");
        assert_eq!(c.matched_text, "7 tomorrow");
        assert_eq!(c.components.day_offset, Some(1));

        let c = first("7 on Friday");
        assert_eq!(c.matched_text, "7 on Friday");
        assert_eq!(c.components.hour, Some(7));
    }

    #[test]
    fn test_leading_period_settles_meridiem() {
        let c = first("this morning at 7");
        assert_eq!(c.matched_text, "this morning at 7");
        assert_eq!(c.components.day_offset, Some(0));
        assert_eq!(c.components.hour, Some(7));
        assert_eq!(c.components.meridiem, Some(Meridiem::Am));

        let c = first("coffee morning at 7 on Friday");
        assert_eq!(c.matched_text, "morning at 7 on Friday");
        assert_eq!(c.components.weekday.unwrap().weekday, Weekday::Fri);
        assert_eq!(c.components.hour, Some(7));

        let c = first("this evening");
        assert_eq!(c.components.day_offset, Some(0));
        assert_eq!(c.components.hour, Some(18));
    }

    #[test]
    fn test_period_word_alone_is_ignored() {
        assert!(scan("good morning everyone").is_empty());
    }

    #[test]
    fn test_tonight_settles_meridiem() {
        let c = first("tonight at 8");
        assert_eq!(c.components.day_offset, Some(0));
        assert_eq!(c.components.hour, Some(20));
        assert_eq!(c.components.meridiem, Some(Meridiem::Pm));
    }

    #[test]
    fn test_morning_settles_meridiem() {
        let c = first("tomorrow morning at 7");
        assert_eq!(c.components.hour, Some(7));
        assert_eq!(c.components.meridiem, Some(Meridiem::Am));
    }

    #[test]
    fn test_inline_range_inherits_end_marker() {
        let c = first("Friday 7-9pm");
        assert_eq!(c.components.hour, Some(19));
        assert_eq!(c.components.meridiem, Some(Meridiem::Pm));
        let c = first("Friday 11-1pm");
        assert_eq!(c.components.hour, Some(11));
        let c = first("Friday 12-2pm");
        assert_eq!(c.components.hour, Some(12));
    }

    #[test]
    fn test_spaced_range() {
        let c = first("from 7 to 9 pm at the park");
        assert_eq!(c.matched_text, "from 7 to 9 pm");
        assert_eq!(c.components.hour, Some(19));
    }

    #[test]
    fn test_offsets() {
        let c = first("in 2 hours");
        let offset = c.components.offset.unwrap();
        assert_eq!((offset.amount, offset.unit), (2, OffsetUnit::Hours));
        let c = first("in a week");
        assert_eq!(c.components.offset.unwrap().unit, OffsetUnit::Weeks);
        assert!(scan("in the lounge").is_empty());
    }

    #[test]
    fn test_leftmost_first_and_non_overlapping() {
        let found = scan("Friday at noon, then Saturday at 7pm");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].matched_text, "Friday at noon");
        assert_eq!(found[1].matched_text, "Saturday at 7pm");
        assert!(found[0].span.end <= found[1].span.start);
    }

    #[test]
    fn test_span_indexes_input_text() {
        let text = "Party ON FRIDAY at 9PM!";
        let c = first(text);
        assert_eq!(&text[c.span.clone()], "ON FRIDAY at 9PM");
        assert_eq!(c.matched_text, "ON FRIDAY at 9PM");
    }

    #[test]
    fn test_no_phrase() {
        assert!(scan("").is_empty());
        assert!(scan("just some words").is_empty());
    }
}
