//! Tests for the filter parser.

use armonik_api_rs::models::{Duration, ResultStatus, SessionStatus, TaskStatus};
use chrono::{TimeZone, Utc};

use super::*;
use crate::entities::{Partition, Result as ResultFields, Session, Task};
use crate::error::FilterError;
use crate::expr::Filter;
use crate::field::{Entity, FieldType};
use crate::operator::Operator;

fn parse(entity: Entity, input: &str) -> Filter {
    FilterParser::parse(entity, input).unwrap()
}

// ==================== Comparison Tests ====================

#[test]
fn test_parse_status_equality() {
    assert_eq!(
        parse(Entity::Task, "status == COMPLETED"),
        Task::status().eq(TaskStatus::Completed)
    );
}

#[test]
fn test_parse_status_case_insensitive_and_quoted() {
    let expected = Task::status().ne(TaskStatus::Error);
    assert_eq!(parse(Entity::Task, "status != error"), expected);
    assert_eq!(parse(Entity::Task, "status != 'TASK_STATUS_ERROR'"), expected);
}

#[test]
fn test_parse_option_number() {
    assert_eq!(
        parse(Entity::Task, "options.priority >= 3"),
        Task::options().priority().ge(3)
    );
}

#[test]
fn test_parse_negative_number() {
    assert_eq!(
        parse(Entity::Partition, "priority > -1"),
        Partition::priority().gt(-1)
    );
}

#[test]
fn test_parse_generic_option() {
    assert_eq!(
        parse(Entity::Session, "options.region == \"eu-west\""),
        Session::options().get("region").eq("eu-west")
    );
}

#[test]
fn test_parse_string_operators() {
    assert_eq!(
        parse(Entity::Result, "name starts_with 'out_'"),
        ResultFields::name().starts_with("out_")
    );
    assert_eq!(
        parse(Entity::Task, "output.error contains timeout"),
        Task::output().error().contains("timeout")
    );
}

#[test]
fn test_parse_date_literal() {
    let date = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
    assert_eq!(
        parse(Entity::Result, "completed_at < \"2024-03-01T08:30:00Z\""),
        ResultFields::completed_at().lt(date)
    );
}

#[test]
fn test_parse_duration_literals() {
    let expected = Session::duration().gt(Duration::from_secs(5400));
    assert_eq!(parse(Entity::Session, "duration > 5400"), expected);
    assert_eq!(parse(Entity::Session, "duration > 1h30m"), expected);
    assert_eq!(parse(Entity::Session, "duration > '1h30m'"), expected);
}

#[test]
fn test_parse_array_contains() {
    assert_eq!(
        parse(Entity::Session, "partition_ids contains gpu"),
        Session::partition_ids().contains("gpu")
    );
}

// ==================== Boolean Field Tests ====================

#[test]
fn test_parse_bare_boolean_field() {
    assert_eq!(
        parse(Entity::Session, "client_submission"),
        Session::client_submission().is(true)
    );
}

#[test]
fn test_parse_boolean_comparisons() {
    let expected = Session::worker_submission().is(false);
    assert_eq!(parse(Entity::Session, "worker_submission is false"), expected);
    assert_eq!(parse(Entity::Session, "worker_submission == false"), expected);
    assert_eq!(parse(Entity::Session, "worker_submission != true"), expected);
    assert_eq!(parse(Entity::Session, "!worker_submission"), expected);
}

// ==================== Boolean Operator Tests ====================

#[test]
fn test_parse_and_or_precedence() {
    let a = Task::status().eq(TaskStatus::Error);
    let b = Task::options().priority().gt(3);
    let c = Task::session_id().eq("s1");
    let expected = (&a | (&b & &c).unwrap()).unwrap();
    assert_eq!(
        parse(
            Entity::Task,
            "status == ERROR | options.priority > 3 & session_id == s1"
        ),
        expected
    );
}

#[test]
fn test_parse_aliases_match_symbols() {
    let canonical = parse(Entity::Task, "!(status == ERROR | status == TIMEOUT) & id == x");
    let aliased = parse(Entity::Task, "~(status == ERROR + status == TIMEOUT) * id == x");
    let minus = parse(Entity::Task, "-(status == ERROR | status == TIMEOUT) & id == x");
    assert_eq!(canonical, aliased);
    assert_eq!(canonical, minus);
    assert_eq!(canonical.leaf_count(), 3);
}

#[test]
fn test_parse_xor() {
    let a = Session::client_submission().is(true);
    let b = Session::worker_submission().is(true);
    assert_eq!(
        parse(Entity::Session, "client_submission ^ worker_submission"),
        a.xor(&b).unwrap()
    );
}

#[test]
fn test_parse_double_negation() {
    let filter = parse(Entity::Result, "!!(size > 10)");
    assert_eq!(filter, ResultFields::size().gt(10));
}

#[test]
fn test_parse_nested_parentheses() {
    let filter = parse(
        Entity::Result,
        "((status == COMPLETED) & ((size < 100) | (size > 1000)))",
    );
    assert_eq!(filter.conjunction_count(), 2);
    let expected = (ResultFields::status().eq(ResultStatus::Completed)
        & (ResultFields::size().lt(100) | ResultFields::size().gt(1000)).unwrap())
    .unwrap();
    assert_eq!(filter, expected);
}

// ==================== Error Tests ====================

#[test]
fn test_parse_empty() {
    assert_eq!(
        FilterParser::parse(Entity::Task, ""),
        Err(ParseError::EmptyExpression)
    );
    assert_eq!(
        FilterParser::parse(Entity::Task, "   "),
        Err(ParseError::EmptyExpression)
    );
}

#[test]
fn test_parse_unclosed_parenthesis() {
    assert_eq!(
        FilterParser::parse(Entity::Task, "(status == ERROR"),
        Err(ParseError::UnclosedParenthesis)
    );
}

#[test]
fn test_parse_trailing_token() {
    assert_eq!(
        FilterParser::parse(Entity::Task, "status == ERROR )"),
        Err(ParseError::unexpected_token(")", 16))
    );
}

#[test]
fn test_parse_unexpected_end() {
    assert_eq!(
        FilterParser::parse(Entity::Task, "status =="),
        Err(ParseError::UnexpectedEndOfInput)
    );
    assert_eq!(
        FilterParser::parse(Entity::Task, "status == ERROR &"),
        Err(ParseError::UnexpectedEndOfInput)
    );
}

#[test]
fn test_parse_unexpected_character() {
    assert_eq!(
        FilterParser::parse(Entity::Task, "status == ERROR $"),
        Err(ParseError::UnexpectedCharacter {
            character: '$',
            position: 16
        })
    );
}

#[test]
fn test_parse_unknown_field_suggests() {
    let error = FilterParser::parse(Entity::Task, "stauts == ERROR").unwrap_err();
    assert_eq!(
        error,
        ParseError::Filter(FilterError::unknown_field(
            Entity::Task,
            "stauts",
            Some("status".into())
        ))
    );
    assert_eq!(error.code(), "unknown_field");
}

#[test]
fn test_parse_not_filterable() {
    assert_eq!(
        FilterParser::parse(Entity::Task, "retry_of_ids contains x"),
        Err(FilterError::not_filterable(Entity::Task, "retry_of_ids").into())
    );
}

#[test]
fn test_parse_type_mismatch() {
    let error = FilterParser::parse(Entity::Task, "options.priority == \"high\"").unwrap_err();
    assert!(matches!(
        error,
        ParseError::Filter(FilterError::TypeMismatch { .. })
    ));
}

#[test]
fn test_parse_unsupported_operator() {
    let error = FilterParser::parse(Entity::Task, "status < COMPLETED").unwrap_err();
    assert_eq!(
        error,
        ParseError::Filter(FilterError::UnsupportedOperator {
            field: "Task.status".into(),
            field_type: FieldType::Status,
            operator: Operator::LessThan,
        })
    );
}

#[test]
fn test_parse_invalid_status_literal() {
    assert_eq!(
        FilterParser::parse(Entity::Session, "status == PROCESSING"),
        Err(ParseError::invalid_literal("status", "PROCESSING", "status"))
    );
}

#[test]
fn test_parse_invalid_date_literal() {
    assert_eq!(
        FilterParser::parse(Entity::Task, "created_at > 'last week'"),
        Err(ParseError::invalid_literal("created_at", "last week", "date"))
    );
}

#[test]
fn test_parse_missing_comparison() {
    assert_eq!(
        FilterParser::parse(Entity::Task, "status"),
        Err(ParseError::MissingComparison {
            field: "status".into()
        })
    );
}

#[test]
fn test_parse_boolean_literal_operand() {
    assert_eq!(
        FilterParser::parse(Entity::Task, "true & status == ERROR"),
        Err(FilterError::NotBoolean.into())
    );
}

#[test]
fn test_parse_boolean_keywords_rejected() {
    assert_eq!(
        FilterParser::parse(Entity::Task, "status == ERROR and id == x"),
        Err(FilterError::NotBoolean.into())
    );
    assert_eq!(
        FilterParser::parse(Entity::Task, "not status == ERROR"),
        Err(FilterError::NotBoolean.into())
    );
}

#[test]
fn test_parse_not_invertible() {
    let error = FilterParser::parse(Entity::Task, "!(id starts_with abc)").unwrap_err();
    assert!(matches!(
        error,
        ParseError::Filter(FilterError::NotInvertible {
            operator: Operator::StartsWith,
            ..
        })
    ));
}

#[test]
fn test_parse_stays_within_entity() {
    let filter = parse(Entity::Session, "status == RUNNING");
    assert_eq!(filter.entity(), Entity::Session);
    assert_eq!(filter, Session::status().eq(SessionStatus::Running));
}
