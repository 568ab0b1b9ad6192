//! Filter messages accepted by the list endpoints.
//!
//! Every list query carries its predicate in disjunctive normal form:
//! [`Filters`] is an OR of [`FiltersAnd`], which is an AND of [`FilterField`]
//! leaves. Each leaf pairs a [`FieldDescriptor`] with exactly one typed
//! payload (`filter_string`, `filter_number`, ...) holding a value and an
//! operator from that payload's own operator enum.

use serde::{Deserialize, Serialize};

use crate::fields::FieldDescriptor;
use crate::models::{Duration, ResultStatus, SessionStatus, TaskStatus, Timestamp};

/// Logical OR of conjunctions. The top-level filter of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    /// The alternatives; a record matches if any of them matches.
    #[serde(rename = "or", default)]
    pub or: Vec<FiltersAnd>,
}

/// Logical AND of leaf comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FiltersAnd {
    /// The comparisons; a record matches if all of them match.
    #[serde(rename = "and", default)]
    pub and: Vec<FilterField>,
}

/// A single comparison on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterField {
    /// The compared attribute.
    pub field: FieldDescriptor,
    /// The typed value/operator pair.
    #[serde(flatten)]
    pub payload: FilterPayload,
}

/// The typed part of a leaf comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterPayload {
    #[serde(rename = "filter_string")]
    String(FilterString),
    #[serde(rename = "filter_number")]
    Number(FilterNumber),
    #[serde(rename = "filter_date")]
    Date(FilterDate),
    #[serde(rename = "filter_duration")]
    Duration(FilterDuration),
    #[serde(rename = "filter_status")]
    Status(FilterStatus),
    #[serde(rename = "filter_boolean")]
    Boolean(FilterBoolean),
    #[serde(rename = "filter_array")]
    Array(FilterArray),
}

impl FilterPayload {
    /// Returns the serde key of this payload (e.g. `filter_string`).
    pub fn variant_name(&self) -> &'static str {
        match self {
            FilterPayload::String(_) => "filter_string",
            FilterPayload::Number(_) => "filter_number",
            FilterPayload::Date(_) => "filter_date",
            FilterPayload::Duration(_) => "filter_duration",
            FilterPayload::Status(_) => "filter_status",
            FilterPayload::Boolean(_) => "filter_boolean",
            FilterPayload::Array(_) => "filter_array",
        }
    }
}

/// String comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterString {
    pub value: String,
    pub operator: FilterStringOperator,
}

/// Integer comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterNumber {
    pub value: i64,
    pub operator: FilterNumberOperator,
}

/// Timestamp comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDate {
    pub value: Timestamp,
    pub operator: FilterDateOperator,
}

/// Duration comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDuration {
    pub value: Duration,
    pub operator: FilterDurationOperator,
}

/// Status comparison. The value is the status of the filtered entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStatus {
    pub value: StatusValue,
    pub operator: FilterStatusOperator,
}

/// Boolean check. There is a single operator, `IS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBoolean {
    pub value: bool,
    pub operator: FilterBooleanOperator,
}

/// Array membership check; the value is one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterArray {
    pub value: String,
    pub operator: FilterArrayOperator,
}

/// A status value of any entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusValue {
    Task(TaskStatus),
    Session(SessionStatus),
    Result(ResultStatus),
}

impl StatusValue {
    /// Returns the protobuf enum name of the wrapped status.
    pub fn wire_name(&self) -> &'static str {
        match self {
            StatusValue::Task(s) => s.wire_name(),
            StatusValue::Session(s) => s.wire_name(),
            StatusValue::Result(s) => s.wire_name(),
        }
    }

    /// Returns the short name of the wrapped status (e.g. `COMPLETED`).
    pub fn name(&self) -> &'static str {
        match self {
            StatusValue::Task(s) => s.name(),
            StatusValue::Session(s) => s.name(),
            StatusValue::Result(s) => s.name(),
        }
    }
}

impl From<TaskStatus> for StatusValue {
    fn from(value: TaskStatus) -> Self {
        StatusValue::Task(value)
    }
}

impl From<SessionStatus> for StatusValue {
    fn from(value: SessionStatus) -> Self {
        StatusValue::Session(value)
    }
}

impl From<ResultStatus> for StatusValue {
    fn from(value: ResultStatus) -> Self {
        StatusValue::Result(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum FilterStringOperator {
    #[serde(rename = "FILTER_STRING_OPERATOR_EQUAL")]
    Equal = 0,
    #[serde(rename = "FILTER_STRING_OPERATOR_NOT_EQUAL")]
    NotEqual = 1,
    #[serde(rename = "FILTER_STRING_OPERATOR_CONTAINS")]
    Contains = 2,
    #[serde(rename = "FILTER_STRING_OPERATOR_NOT_CONTAINS")]
    NotContains = 3,
    #[serde(rename = "FILTER_STRING_OPERATOR_STARTS_WITH")]
    StartsWith = 4,
    #[serde(rename = "FILTER_STRING_OPERATOR_ENDS_WITH")]
    EndsWith = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum FilterNumberOperator {
    #[serde(rename = "FILTER_NUMBER_OPERATOR_EQUAL")]
    Equal = 0,
    #[serde(rename = "FILTER_NUMBER_OPERATOR_NOT_EQUAL")]
    NotEqual = 1,
    #[serde(rename = "FILTER_NUMBER_OPERATOR_LESS_THAN")]
    LessThan = 2,
    #[serde(rename = "FILTER_NUMBER_OPERATOR_LESS_THAN_OR_EQUAL")]
    LessThanOrEqual = 3,
    #[serde(rename = "FILTER_NUMBER_OPERATOR_GREATER_THAN_OR_EQUAL")]
    GreaterThanOrEqual = 4,
    #[serde(rename = "FILTER_NUMBER_OPERATOR_GREATER_THAN")]
    GreaterThan = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum FilterDateOperator {
    #[serde(rename = "FILTER_DATE_OPERATOR_EQUAL")]
    Equal = 0,
    #[serde(rename = "FILTER_DATE_OPERATOR_NOT_EQUAL")]
    NotEqual = 1,
    #[serde(rename = "FILTER_DATE_OPERATOR_BEFORE")]
    Before = 2,
    #[serde(rename = "FILTER_DATE_OPERATOR_BEFORE_OR_EQUAL")]
    BeforeOrEqual = 3,
    #[serde(rename = "FILTER_DATE_OPERATOR_AFTER_OR_EQUAL")]
    AfterOrEqual = 4,
    #[serde(rename = "FILTER_DATE_OPERATOR_AFTER")]
    After = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum FilterDurationOperator {
    #[serde(rename = "FILTER_DURATION_OPERATOR_EQUAL")]
    Equal = 0,
    #[serde(rename = "FILTER_DURATION_OPERATOR_NOT_EQUAL")]
    NotEqual = 1,
    #[serde(rename = "FILTER_DURATION_OPERATOR_SHORTER_THAN")]
    ShorterThan = 2,
    #[serde(rename = "FILTER_DURATION_OPERATOR_SHORTER_THAN_OR_EQUAL")]
    ShorterThanOrEqual = 3,
    #[serde(rename = "FILTER_DURATION_OPERATOR_LONGER_THAN_OR_EQUAL")]
    LongerThanOrEqual = 4,
    #[serde(rename = "FILTER_DURATION_OPERATOR_LONGER_THAN")]
    LongerThan = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum FilterStatusOperator {
    #[serde(rename = "FILTER_STATUS_OPERATOR_EQUAL")]
    Equal = 0,
    #[serde(rename = "FILTER_STATUS_OPERATOR_NOT_EQUAL")]
    NotEqual = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum FilterBooleanOperator {
    #[serde(rename = "FILTER_BOOLEAN_OPERATOR_IS")]
    Is = 0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum FilterArrayOperator {
    #[serde(rename = "FILTER_ARRAY_OPERATOR_CONTAINS")]
    Contains = 0,
    #[serde(rename = "FILTER_ARRAY_OPERATOR_NOT_CONTAINS")]
    NotContains = 1,
}
