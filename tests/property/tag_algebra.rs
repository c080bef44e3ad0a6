// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Tag Sets
//!
//! Tag sets form a monoid under concatenation: the empty set is the
//! identity, `None` is absorbed, and grouping does not change the result.

use cim_cloudformation::{TagSet, TemplateError, Value};
use proptest::prelude::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

fn tag_key() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,6}"
}

fn tag_value() -> impl Strategy<Value = String> {
    "[a-z0-9-]{0,10}"
}

/// Generate a tag set of up to eight tags; keys may repeat
fn tag_set() -> impl Strategy<Value = TagSet> {
    prop::collection::vec((tag_key(), tag_value()), 0..8)
        .prop_map(|pairs| TagSet::from_pairs(pairs))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Concatenation is associative
    #[test]
    fn prop_concatenation_is_associative(a in tag_set(), b in tag_set(), c in tag_set()) {
        let left = (a.clone() + b.clone()) + c.clone();
        let right = a + (b + c);
        prop_assert_eq!(left, right);
    }

    /// Property: The empty set and `None` are identities
    #[test]
    fn prop_empty_and_none_are_identities(a in tag_set()) {
        prop_assert_eq!(TagSet::default() + a.clone(), a.clone());
        prop_assert_eq!(a.clone() + TagSet::default(), a.clone());
        prop_assert_eq!(a.clone() + None, a.clone());
        prop_assert_eq!(a.merge(&Value::Null).unwrap(), a);
    }

    /// Property: Concatenation keeps every tag from both operands, in order
    #[test]
    fn prop_concatenation_preserves_order(a in tag_set(), b in tag_set()) {
        let joined = a.clone() + b.clone();
        prop_assert_eq!(joined.len(), a.len() + b.len());

        let expected: Vec<&str> = a.iter().chain(b.iter()).map(|tag| tag.key()).collect();
        let actual: Vec<&str> = joined.iter().map(|tag| tag.key()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: Lookup sees the right operand's value for a shared key
    #[test]
    fn prop_later_tag_wins(a in tag_set(), key in tag_key(), value in tag_value()) {
        let joined = a + TagSet::new(Vec::new(), [(key.clone(), value.clone())]);
        prop_assert_eq!(joined.get(&key), Some(&Value::from(value)));
    }

    /// Property: Only tag sets (or nothing) can be merged
    #[test]
    fn prop_merge_rejects_scalars(a in tag_set(), text in "[a-z]{1,8}", number in any::<i32>()) {
        prop_assert!(
            matches!(
                a.merge(&Value::from(text)),
                Err(TemplateError::MergeTypeError { .. })
            ),
            "Strings must not merge into a tag set"
        );
        prop_assert!(
            matches!(
                a.merge(&Value::from(number)),
                Err(TemplateError::MergeTypeError { .. })
            ),
            "Numbers must not merge into a tag set"
        );
    }

    /// Property: Propagation marks every rendered tag
    #[test]
    fn prop_propagation_marks_every_tag(a in tag_set(), propagate in any::<bool>()) {
        let rendered = serde_json::to_value(a.propagating(propagate)).unwrap();
        let tags = rendered.as_array().unwrap();
        prop_assert_eq!(tags.len(), a.len());
        for tag in tags {
            prop_assert_eq!(&tag["PropagateAtLaunch"], &serde_json::Value::Bool(propagate));
        }
    }
}
