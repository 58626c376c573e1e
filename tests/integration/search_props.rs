//! Property tests for guest search

use proptest::prelude::*;
use vows::{GuestDirectory, GuestRecord, SearchOutcome};

fn directory(names: &[String]) -> GuestDirectory {
    GuestDirectory::new(names.iter().map(GuestRecord::new).collect())
}

proptest! {
    #[test]
    fn search_returns_exactly_the_containing_names(
        names in prop::collection::vec("[A-Za-z ]{1,12}", 0..20),
        query in "[A-Za-z]{1,4}",
    ) {
        let dir = directory(&names);
        let needle = query.to_lowercase();

        let expected: Vec<usize> = names
            .iter()
            .enumerate()
            .filter(|(_, n)| n.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();

        prop_assert_eq!(dir.search_indices(&query), expected);
    }

    #[test]
    fn search_ignores_case(
        names in prop::collection::vec("[A-Za-z ]{1,12}", 1..20),
        query in "[A-Za-z]{1,4}",
    ) {
        let dir = directory(&names);
        prop_assert_eq!(
            dir.search_indices(&query.to_uppercase()),
            dir.search_indices(&query.to_lowercase())
        );
    }

    #[test]
    fn blank_query_hides_results(
        names in prop::collection::vec("[A-Za-z]{1,12}", 0..10),
        blank in "[ \t]{0,3}",
    ) {
        let dir = directory(&names);
        prop_assert!(dir.search_indices(&blank).is_empty());
        prop_assert_eq!(dir.outcome(&blank), SearchOutcome::Hidden);
    }

    #[test]
    fn no_match_carries_the_typed_text(query in "[0-9]{1,6}") {
        let dir = directory(&["Juan".to_string(), "Maria".to_string()]);
        prop_assert_eq!(
            dir.outcome(&query),
            SearchOutcome::NoMatch { request_name: query.clone() }
        );
    }
}
