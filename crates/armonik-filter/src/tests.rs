//! Tests for the combinator algebra.

use armonik_api_rs::models::{ResultStatus, SessionStatus, TaskStatus};

use crate::entities::{Result as ResultFields, Session, Task};
use crate::*;

fn leaves(filter: &Filter) -> Vec<Vec<String>> {
    filter
        .to_disjunction()
        .unwrap()
        .conjunctions()
        .iter()
        .map(|c| c.leaves().iter().map(|l| l.to_string()).collect())
        .collect()
}

fn a() -> Filter {
    Task::status().eq(TaskStatus::Error)
}

fn b() -> Filter {
    Task::options().priority().gt(3)
}

fn c() -> Filter {
    Task::session_id().eq("s1")
}

fn d() -> Filter {
    Task::options().max_retries().le(2)
}

// ==================== Shape Tests ====================

#[test]
fn test_leaf_stays_leaf() {
    assert!(matches!(a(), Filter::Leaf(_)));
    assert_eq!(a().conjunction_count(), 1);
    assert_eq!(a().leaf_count(), 1);
}

#[test]
fn test_and_of_leaves_is_conjunction() {
    let filter = (a() & b()).unwrap();
    assert!(matches!(filter, Filter::Conjunction(_)));
    assert_eq!(
        leaves(&filter),
        vec![vec!["status == ERROR", "options.priority > 3"]]
    );
}

#[test]
fn test_or_of_leaves_is_disjunction() {
    let filter = (a() | b()).unwrap();
    assert!(matches!(filter, Filter::Disjunction(_)));
    assert_eq!(
        leaves(&filter),
        vec![vec!["status == ERROR"], vec!["options.priority > 3"]]
    );
}

#[test]
fn test_and_product_is_left_major() {
    let filter = ((a() | b()).unwrap() & (c() | d()).unwrap()).unwrap();
    assert_eq!(
        leaves(&filter),
        vec![
            vec!["status == ERROR", "session_id == \"s1\""],
            vec!["status == ERROR", "options.max_retries <= 2"],
            vec!["options.priority > 3", "session_id == \"s1\""],
            vec!["options.priority > 3", "options.max_retries <= 2"],
        ]
    );
}

#[test]
fn test_or_concatenates_in_order() {
    let left = (a() & b()).unwrap();
    let right = (c() | d()).unwrap();
    let filter = (left | right).unwrap();
    assert_eq!(
        leaves(&filter),
        vec![
            vec!["status == ERROR", "options.priority > 3"],
            vec!["session_id == \"s1\""],
            vec!["options.max_retries <= 2"],
        ]
    );
}

#[test]
fn test_conversions_normalize_shape() {
    let single = a().to_disjunction().unwrap();
    assert_eq!(Filter::from(single), a());

    let Filter::Conjunction(conjunction) = (a() & b()).unwrap() else {
        panic!("expected a conjunction");
    };
    assert_eq!(Filter::from(conjunction.clone()).to_string(), conjunction.to_string());
}

// ==================== Negation Tests ====================

#[test]
fn test_negate_leaf_swaps_operator() {
    assert_eq!((!a()).unwrap(), Task::status().ne(TaskStatus::Error));
    assert_eq!((-b()).unwrap(), Task::options().priority().le(3));
}

#[test]
fn test_negate_conjunction_is_disjunction_of_negations() {
    let filter = (!(a() & b()).unwrap()).unwrap();
    assert_eq!(
        leaves(&filter),
        vec![vec!["status != ERROR"], vec!["options.priority <= 3"]]
    );
}

#[test]
fn test_negate_disjunction_is_product() {
    let filter = ((a() & b()).unwrap() | (c() & d()).unwrap()).unwrap();
    let negated = filter.negate().unwrap();
    assert_eq!(
        leaves(&negated),
        vec![
            vec!["status != ERROR", "session_id != \"s1\""],
            vec!["status != ERROR", "options.max_retries > 2"],
            vec!["options.priority <= 3", "session_id != \"s1\""],
            vec!["options.priority <= 3", "options.max_retries > 2"],
        ]
    );
}

#[test]
fn test_negate_boolean_leaf() {
    let filter = Session::client_submission().is(true);
    assert_eq!((!filter).unwrap(), Session::client_submission().is(false));
}

#[test]
fn test_negate_nested_starts_with_names_leaf() {
    let filter = (a() | (b() & Task::id().starts_with("x")).unwrap()).unwrap();
    assert_eq!(
        filter.negate(),
        Err(FilterError::NotInvertible {
            leaf: "id starts_with \"x\"".into(),
            operator: Operator::StartsWith,
        })
    );
}

#[test]
fn test_negate_ends_with_fails() {
    let filter = Task::output().error().ends_with("oom");
    assert!(matches!(
        !filter,
        Err(FilterError::NotInvertible {
            operator: Operator::EndsWith,
            ..
        })
    ));
}

// ==================== Empty Filter Tests ====================

#[test]
fn test_empty_cannot_be_combined() {
    let empty = Filter::empty(Entity::Task);
    let expected = Err(FilterError::EmptyFilter {
        entity: Entity::Task,
    });
    assert_eq!(&empty & &a(), expected);
    assert_eq!(&a() | &empty, expected);
    assert_eq!(!&empty, expected);
    assert_eq!(&empty ^ &a(), expected);
    assert_eq!(empty.is(true), expected);
    assert!(matches!(
        empty.to_disjunction(),
        Err(FilterError::EmptyFilter { .. })
    ));
}

#[test]
fn test_compatibility_checked_before_emptiness() {
    let empty = Filter::empty(Entity::Session);
    assert_eq!(
        a().and(&empty),
        Err(FilterError::IncompatibleFilterTypes {
            left: Entity::Task,
            right: Entity::Session,
        })
    );
}

// ==================== Compatibility Tests ====================

#[test]
fn test_incompatible_entities() {
    let session = Session::status().eq(SessionStatus::Running);
    let result = ResultFields::status().eq(ResultStatus::Completed);
    assert_eq!(
        &session | &result,
        Err(FilterError::IncompatibleFilterTypes {
            left: Entity::Session,
            right: Entity::Result,
        })
    );
    assert_eq!(
        &result * &session,
        Err(FilterError::IncompatibleFilterTypes {
            left: Entity::Result,
            right: Entity::Session,
        })
    );
}

#[test]
fn test_options_and_output_share_task_class() {
    let filter = ((Task::options().get("gpu").eq("a100") & Task::output().error().contains("x"))
        .unwrap()
        | a())
    .unwrap();
    assert_eq!(filter.entity(), Entity::Task);
    assert_eq!(filter.leaf_count(), 3);
}

// ==================== Operator Alias Tests ====================

#[test]
fn test_aliases_match_named_combinators() {
    assert_eq!(a() * b(), a().and(&b()));
    assert_eq!(a() + b(), a().or(&b()));
    assert_eq!(-a(), a().negate());
    assert_eq!(a() ^ b(), a().xor(&b()));
    assert_eq!(&a() & b(), a() & &b());
}

#[test]
fn test_xor_expansion() {
    let filter = (a() ^ b()).unwrap();
    assert_eq!(
        leaves(&filter),
        vec![
            vec!["status == ERROR", "options.priority <= 3"],
            vec!["status != ERROR", "options.priority > 3"],
        ]
    );
}

#[test]
fn test_is_duality() {
    let filter = (a() | b()).unwrap();
    assert_eq!(filter.is(true).unwrap(), filter);
    assert_eq!(filter.is(false).unwrap(), filter.negate().unwrap());
}

#[test]
fn test_filter_is_not_a_boolean() {
    assert_eq!(bool::try_from(&a()), Err(FilterError::NotBoolean));
    assert_eq!(bool::try_from(a()), Err(FilterError::NotBoolean));
}

// ==================== Expansion Tests ====================

#[test]
fn test_large_expansion_is_exact() {
    let side = |n: i64| {
        (0..n)
            .map(|i| Task::options().priority().eq(i))
            .reduce(|acc, leaf| (acc | leaf).unwrap())
            .unwrap()
    };
    let left = side(70);
    let right = side(60);
    let product = (&left & &right).unwrap();
    assert!(product.conjunction_count() > LARGE_EXPANSION_THRESHOLD);
    assert_eq!(product.conjunction_count(), 70 * 60);
    assert_eq!(product.leaf_count(), 70 * 60 * 2);
}

// ==================== Display Tests ====================

#[test]
fn test_display_groups_conjunctions() {
    let filter = ((a() & b()).unwrap() | c()).unwrap();
    assert_eq!(
        filter.to_string(),
        "(status == ERROR & options.priority > 3) | session_id == \"s1\""
    );
    assert_eq!(Filter::empty(Entity::Partition).to_string(), "<empty Partition filter>");
}
