//! Forward-biased day selection.
//!
//! Turns the sparse components of a phrase into one instant. Whenever the
//! phrase leaves the date open ("Tuesday", "March 8", "7pm"), the nearest
//! occurrence at or after `now` is chosen, never a past one. Explicit dates
//! and relative days ("yesterday", "March 8 2020") are taken as written.
//!
//! All calendar arithmetic happens on the civil calendar of the context's
//! timezone: "tomorrow" is the next local date, not `now + 24h`.

use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::candidate::{OffsetUnit, PartialDateTime, RelativeOffset, WeekdayRef};
use crate::context::ReferenceContext;

/// Hour used when a phrase names a day but no time ("Friday", "March 8").
pub const IMPLIED_HOUR: u32 = 12;

/// How many years ahead a yearless date is searched for (covers Feb 29).
const YEAR_SEARCH_SPAN: i32 = 8;

/// Resolve components against the context. Returns `None` when the
/// components do not describe a representable instant.
pub fn resolve(c: &PartialDateTime, ctx: &ReferenceContext) -> Option<DateTime<Utc>> {
    let tz = ctx.timezone();
    let floor = ctx.minute_floor();

    if c.is_now {
        return Some(floor);
    }
    if let Some(offset) = c.offset {
        return apply_offset(ctx, offset);
    }

    let time = time_of_day(c)?;
    let today = ctx.local_now().date_naive();

    match (c.year, c.month, c.day) {
        (Some(year), Some(month), Some(day)) => {
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            localize(&tz, date.and_time(time))
        }
        (None, Some(month), Some(day)) => {
            next_calendar_occurrence(&tz, today.year(), month, day, time, floor)
        }
        _ => {
            if let Some(days) = c.day_offset {
                let date = today.checked_add_signed(TimeDelta::try_days(days)?)?;
                localize(&tz, date.and_time(time))
            } else if let Some(weekday) = c.weekday {
                next_weekday_occurrence(&tz, today, weekday, time, floor)
            } else {
                // Time only: today, or tomorrow once today's has passed.
                let at = localize(&tz, today.and_time(time))?;
                if at >= floor {
                    Some(at)
                } else {
                    localize(&tz, today.succ_opt()?.and_time(time))
                }
            }
        }
    }
}

fn time_of_day(c: &PartialDateTime) -> Option<NaiveTime> {
    match c.hour {
        Some(hour) => NaiveTime::from_hms_opt(hour, c.minute.unwrap_or(0), 0),
        None => NaiveTime::from_hms_opt(IMPLIED_HOUR, 0, 0),
    }
}

/// First year, starting at `from_year`, where month/day exists and lands at
/// or after `floor`.
fn next_calendar_occurrence(
    tz: &Tz,
    from_year: i32,
    month: u32,
    day: u32,
    time: NaiveTime,
    floor: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    (from_year..=from_year + YEAR_SEARCH_SPAN)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .filter_map(|date| localize(tz, date.and_time(time)))
        .find(|at| *at >= floor)
}

/// Nearest date with the given weekday whose time is at or after `floor`.
/// "next <weekday>" skips today.
fn next_weekday_occurrence(
    tz: &Tz,
    today: NaiveDate,
    target: WeekdayRef,
    time: NaiveTime,
    floor: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let days_ahead = (target.weekday.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    let days_ahead = if target.next && days_ahead == 0 {
        7
    } else {
        days_ahead
    };

    let date = today + TimeDelta::days(days_ahead);
    let at = localize(tz, date.and_time(time))?;
    if at >= floor {
        Some(at)
    } else {
        localize(tz, (date + TimeDelta::days(7)).and_time(time))
    }
}

/// "in 2 hours" moves the instant; "in 3 days" moves the civil date and keeps
/// the wall-clock time.
fn apply_offset(ctx: &ReferenceContext, offset: RelativeOffset) -> Option<DateTime<Utc>> {
    let floor = ctx.minute_floor();
    match offset.unit {
        OffsetUnit::Minutes => floor.checked_add_signed(TimeDelta::try_minutes(offset.amount)?),
        OffsetUnit::Hours => floor.checked_add_signed(TimeDelta::try_hours(offset.amount)?),
        OffsetUnit::Days | OffsetUnit::Weeks => {
            let days = match offset.unit {
                OffsetUnit::Weeks => offset.amount.checked_mul(7)?,
                _ => offset.amount,
            };
            let local = floor.with_timezone(&ctx.timezone()).naive_local();
            let moved = local.checked_add_signed(TimeDelta::try_days(days)?)?;
            localize(&ctx.timezone(), moved)
        }
    }
}

/// Interpret a local wall-clock time in `tz`.
///
/// Times repeated by a DST fall-back take the earlier instant. Times skipped
/// by a spring-forward are read with the offset in force before the gap,
/// which lands them the gap's length later (02:30 becomes 03:30).
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let before_gap = naive.checked_sub_signed(TimeDelta::hours(3))?;
            let offset = tz.offset_from_local_datetime(&before_gap).earliest()?.fix();
            let shift = TimeDelta::seconds(offset.local_minus_utc() as i64);
            let utc = naive.checked_sub_signed(shift)?;
            Some(utc.and_utc())
        }
    }
}
