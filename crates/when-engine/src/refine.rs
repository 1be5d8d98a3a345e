//! Post-grammar refinement: the evening rule for unmarked small hours.
//!
//! People scheduling events write "meet at 7" or "call at 3" and mean the
//! evening or afternoon. When a phrase gives an hour from 1 through 8 with no
//! am/pm marker and no 24-hour reading, the hour is moved into the afternoon
//! and the meridiem becomes known. Unmarked 9–12 keep the grammar's reading,
//! and so does anything whose half of the day is already settled.
//!
//! Refinement runs on every candidate before day selection, since moving the
//! hour by twelve can change which day is the next occurrence.

use crate::candidate::{Meridiem, ParseCandidate, PartialDateTime};

/// Unmarked hours in this band are read as PM.
pub const EVENING_BAND: std::ops::RangeInclusive<u32> = 1..=8;

/// Apply the evening rule to one set of components.
pub fn apply_meridiem_rule(components: PartialDateTime) -> PartialDateTime {
    match components.hour {
        Some(hour) if components.meridiem.is_none() && EVENING_BAND.contains(&hour) => {
            tracing::trace!(hour, "reading unmarked hour as PM");
            PartialDateTime {
                hour: Some(hour + 12),
                meridiem: Some(Meridiem::Pm),
                ..components
            }
        }
        _ => components,
    }
}

/// Apply the evening rule to a candidate, keeping its text and span.
pub fn refine_candidate(candidate: ParseCandidate) -> ParseCandidate {
    ParseCandidate {
        components: apply_meridiem_rule(candidate.components),
        ..candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_hour(hour: u32, meridiem: Option<Meridiem>) -> PartialDateTime {
        PartialDateTime {
            hour: Some(hour),
            minute: Some(0),
            meridiem,
            ..Default::default()
        }
    }

    #[test]
    fn test_unmarked_band_moves_to_pm() {
        for hour in 1..=8 {
            let refined = apply_meridiem_rule(with_hour(hour, None));
            assert_eq!(refined.hour, Some(hour + 12), "hour {hour}");
            assert_eq!(refined.meridiem, Some(Meridiem::Pm));
        }
    }

    #[test]
    fn test_unmarked_nine_through_twelve_unchanged() {
        for hour in 9..=12 {
            let refined = apply_meridiem_rule(with_hour(hour, None));
            assert_eq!(refined, with_hour(hour, None), "hour {hour}");
        }
    }

    #[test]
    fn test_unmarked_zero_unchanged() {
        assert_eq!(apply_meridiem_rule(with_hour(0, None)).hour, Some(0));
    }

    #[test]
    fn test_marked_hours_unchanged() {
        let am = with_hour(7, Some(Meridiem::Am));
        assert_eq!(apply_meridiem_rule(am), am);
        let pm = with_hour(15, Some(Meridiem::Pm));
        assert_eq!(apply_meridiem_rule(pm), pm);
    }

    #[test]
    fn test_no_hour_unchanged() {
        let date_only = PartialDateTime {
            month: Some(3),
            day: Some(8),
            ..Default::default()
        };
        assert_eq!(apply_meridiem_rule(date_only), date_only);
    }

    #[test]
    fn test_refine_candidate_keeps_text() {
        let candidate = ParseCandidate {
            matched_text: "at 7".to_string(),
            span: 7..11,
            components: with_hour(7, None),
        };
        let refined = refine_candidate(candidate);
        assert_eq!(refined.matched_text, "at 7");
        assert_eq!(refined.span, 7..11);
        assert_eq!(refined.components.hour, Some(19));
    }
}
