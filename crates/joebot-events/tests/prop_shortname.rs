//! Property-based tests for channel name handling.

use joebot_events::form::suggest_shortname;
use joebot_events::submission::is_valid_shortname;
use proptest::prelude::*;

proptest! {
    /// Any non-empty suggestion passes validation unchanged.
    #[test]
    fn suggested_names_are_valid(title in ".{0,40}") {
        let name = suggest_shortname(&title);
        prop_assert!(name.is_empty() || is_valid_shortname(&name), "{:?} -> {:?}", title, name);
        prop_assert!(!name.starts_with('-') && !name.ends_with('-'));
        prop_assert!(!name.contains("--"));
    }

    /// A name that is already valid and dash-tidy is its own suggestion.
    #[test]
    fn valid_names_are_fixed_points(name in "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,3}") {
        prop_assert_eq!(suggest_shortname(&name), name);
    }
}
