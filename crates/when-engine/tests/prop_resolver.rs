//! Property-based tests for the resolver using proptest.
//!
//! These hold for any reference instant and zone, not just the fixed frame
//! used in `resolver_tests.rs`.

use chrono::{LocalResult, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use when_engine::{extract_from_prose, format, parse_standalone, ReferenceContext};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_timezone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(chrono_tz::UTC),
        Just(chrono_tz::America::Los_Angeles),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Europe::London),
        Just(chrono_tz::Asia::Tokyo),
        Just(chrono_tz::Australia::Sydney),
    ]
}

/// A reference instant somewhere in 2024-2026, with arbitrary seconds.
fn arb_context() -> impl Strategy<Value = ReferenceContext> {
    (0i64..3 * 365 * 24 * 60, 0i64..60, arb_timezone()).prop_map(|(minutes, seconds, tz)| {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let now = base + TimeDelta::minutes(minutes) + TimeDelta::seconds(seconds);
        ReferenceContext::new(now, tz)
    })
}

/// Phrases that always resolve, paired with nothing else in the text.
fn arb_phrase() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("tomorrow at 2pm".to_string()),
        Just("Friday 7".to_string()),
        Just("March 8".to_string()),
        Just("next Tuesday evening".to_string()),
        Just("noon".to_string()),
        Just("7:30pm".to_string()),
        Just("in 2 hours".to_string()),
        Just("at 9".to_string()),
        Just("3/14 at 6".to_string()),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Unmarked hours 1-8 always land in the afternoon or evening.
    #[test]
    fn unmarked_small_hour_is_pm(ctx in arb_context(), hour in 1u32..=8, minute in 0u32..60) {
        let text = format!("tomorrow at {hour}:{minute:02}");
        let r = parse_standalone(&text, &ctx).unwrap();
        prop_assert_eq!(r.local().hour(), hour + 12);
        prop_assert_eq!(r.local().minute(), minute);
    }

    /// Unmarked hours 9-12 keep the grammar's own reading.
    #[test]
    fn unmarked_late_hour_is_unchanged(ctx in arb_context(), hour in 9u32..=12) {
        let text = format!("tomorrow at {hour}");
        let r = parse_standalone(&text, &ctx).unwrap();
        prop_assert_eq!(r.local().hour(), hour);
    }

    /// A written marker is never overridden.
    #[test]
    fn marked_hour_is_unchanged(ctx in arb_context(), hour in 1u32..=12, pm in any::<bool>()) {
        let text = format!("tomorrow at {hour}{}", if pm { "pm" } else { "am" });
        let r = parse_standalone(&text, &ctx).unwrap();
        let expected = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        // 2am on a spring-forward day is the only hour a marker cannot keep.
        let local = r.local();
        if local.hour() != expected {
            prop_assert_eq!(local.hour(), expected + 1);
        }
    }

    /// Forward bias: an under-specified date never resolves before now.
    #[test]
    fn open_dates_are_never_in_the_past(ctx in arb_context(), phrase in arb_phrase()) {
        let r = parse_standalone(&phrase, &ctx).unwrap();
        prop_assert!(r.utc() >= ctx.minute_floor(), "{} resolved to {}", phrase, r.utc());
    }

    /// Every resolved instant is at minute precision.
    #[test]
    fn resolved_instants_have_no_seconds(ctx in arb_context(), phrase in arb_phrase()) {
        let r = parse_standalone(&phrase, &ctx).unwrap();
        prop_assert_eq!(r.utc().second(), 0);
        prop_assert_eq!(r.utc().nanosecond(), 0);
    }

    /// Formatting and parsing back gives the same minute.
    #[test]
    fn format_then_parse_is_stable(ctx in arb_context(), days in 0i64..364) {
        let r = parse_standalone(&format!("in {days} days"), &ctx).unwrap();
        // A wall-clock time repeated by a fall-back cannot name its second instance.
        prop_assume!(matches!(
            ctx.timezone().from_local_datetime(&r.local().naive_local()),
            LocalResult::Single(_)
        ));

        let shown = format(Some(&r), &ctx);
        let again = parse_standalone(&shown, &ctx);
        prop_assert_eq!(again, Some(r), "shown as {}", shown);
    }

    /// With two phrases in the text, the first one is returned.
    #[test]
    fn leftmost_phrase_wins(ctx in arb_context(), first in arb_phrase(), second in arb_phrase()) {
        let text = format!("Plan: {first} and then {second} after that");
        let found = extract_from_prose(&text, &ctx).unwrap();
        prop_assert_eq!(&found.matched_text, &first);
        prop_assert_eq!(Some(found.resolved), parse_standalone(&first, &ctx));
    }
}
