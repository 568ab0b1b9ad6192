//! Comparison values.

use std::fmt;

use armonik_api_rs::filters::StatusValue;
use armonik_api_rs::models::{Duration, ResultStatus, SessionStatus, TaskStatus, Timestamp};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

use crate::field::{Entity, FieldType};

/// The right-hand side of a leaf comparison.
///
/// Dates and durations are stored in their wire encoding, so a value built
/// from a `DateTime<Utc>` and one built from the equivalent [`Timestamp`]
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    String(String),
    Number(i64),
    Date(Timestamp),
    Duration(Duration),
    Status(StatusValue),
    Boolean(bool),
}

impl Value {
    /// Returns a short name of the value kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::Duration(_) => "duration",
            Value::Status(StatusValue::Task(_)) => "Task status",
            Value::Status(StatusValue::Session(_)) => "Session status",
            Value::Status(StatusValue::Result(_)) => "Result status",
            Value::Boolean(_) => "boolean",
        }
    }

    /// Returns true if this value can be compared with a field of type
    /// `field_type` belonging to `entity`.
    ///
    /// Array fields take a single string element. Status values must be the
    /// status enum of the field's own entity.
    pub fn fits(&self, field_type: FieldType, entity: Entity) -> bool {
        match (self, field_type) {
            (Value::String(_), FieldType::String | FieldType::Array) => true,
            (Value::Number(_), FieldType::Number) => true,
            (Value::Date(_), FieldType::Date) => true,
            (Value::Duration(_), FieldType::Duration) => true,
            (Value::Boolean(_), FieldType::Boolean) => true,
            (Value::Status(status), FieldType::Status) => matches!(
                (status, entity),
                (StatusValue::Task(_), Entity::Task)
                    | (StatusValue::Session(_), Entity::Session)
                    | (StatusValue::Result(_), Entity::Result)
            ),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s:?}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Date(ts) => match ts.to_datetime() {
                Some(date) => f.write_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
                None => write!(f, "{}s", ts.seconds),
            },
            Value::Duration(d) if d.nanos == 0 => write!(f, "{}s", d.seconds),
            Value::Duration(d) => write!(f, "{}ns", d.as_nanos()),
            Value::Status(status) => f.write_str(status.name()),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

macro_rules! number_from {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(i64::from(value))
                }
            }
        )+
    };
}

number_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value.into())
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Value::Date(value)
    }
}

impl From<TimeDelta> for Value {
    fn from(value: TimeDelta) -> Self {
        Value::Duration(value.into())
    }
}

impl From<std::time::Duration> for Value {
    fn from(value: std::time::Duration) -> Self {
        Value::Duration(value.into())
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<StatusValue> for Value {
    fn from(value: StatusValue) -> Self {
        Value::Status(value)
    }
}

impl From<TaskStatus> for Value {
    fn from(value: TaskStatus) -> Self {
        Value::Status(value.into())
    }
}

impl From<SessionStatus> for Value {
    fn from(value: SessionStatus) -> Self {
        Value::Status(value.into())
    }
}

impl From<ResultStatus> for Value {
    fn from(value: ResultStatus) -> Self {
        Value::Status(value.into())
    }
}
