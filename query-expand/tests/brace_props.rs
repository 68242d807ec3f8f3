//! Property-based tests for brace expansion
//!
//! These tests use proptest to generate random patterns and check the
//! expansion invariants that hold for every input.

use proptest::prelude::*;
use query_expand::{generate, unescape, BraceExpander};

proptest! {
    #[test]
    fn test_expand_doesnt_panic_on_random_input(s in "\\PC*") {
        let expanded = BraceExpander::expand(&s);
        // Every pattern yields at least one string
        prop_assert!(!expanded.is_empty());
    }

    #[test]
    fn test_plain_text_is_returned_unchanged(s in "[a-zA-Z0-9,}. -]{0,40}") {
        prop_assert_eq!(BraceExpander::expand(&s), vec![s]);
    }

    #[test]
    fn test_pattern_without_open_brace_is_only_unescaped(s in "[a-z,}\\\\]{0,30}") {
        prop_assert_eq!(BraceExpander::expand(&s), vec![unescape(&s)]);
    }

    #[test]
    fn test_single_group_keeps_alternative_order(
        prefix in "[a-z0-9]{0,8}",
        alternatives in prop::collection::vec("[a-z0-9]{0,5}", 2..6),
        suffix in "[a-z0-9]{0,8}",
    ) {
        let pattern = format!("{}{{{}}}{}", prefix, alternatives.join(","), suffix);
        let expected: Vec<String> = alternatives
            .iter()
            .map(|alt| format!("{}{}{}", prefix, alt, suffix))
            .collect();

        prop_assert_eq!(BraceExpander::expand(&pattern), expected);
    }

    #[test]
    fn test_sibling_groups_multiply(
        left in prop::collection::vec("[a-z]{1,3}", 2..5),
        right in prop::collection::vec("[0-9]{1,3}", 2..5),
    ) {
        let pattern = format!("{{{}}}-{{{}}}", left.join(","), right.join(","));
        let expanded = BraceExpander::expand(&pattern);

        prop_assert_eq!(expanded.len(), left.len() * right.len());
        // Left group varies slowest
        prop_assert_eq!(&expanded[0], &format!("{}-{}", left[0], right[0]));
        prop_assert_eq!(
            &expanded[expanded.len() - 1],
            &format!("{}-{}", left[left.len() - 1], right[right.len() - 1])
        );
    }

    #[test]
    fn test_expanded_output_is_fixed_point(
        alternatives in prop::collection::vec("[a-z ]{0,6}", 2..5),
    ) {
        let pattern = format!("x{{{}}}y", alternatives.join(","));
        for value in BraceExpander::expand(&pattern) {
            prop_assert_eq!(BraceExpander::expand(&value), vec![value.clone()]);
        }
    }

    #[test]
    fn test_list_mode_keeps_every_value(values in prop::collection::vec("\\PC{0,10}", 0..8)) {
        let queries = generate("k", None, Some(values.clone()), false).unwrap();
        let produced: Vec<String> = queries.iter().map(|q| q.value().to_string()).collect();
        prop_assert_eq!(produced, values);
    }
}
