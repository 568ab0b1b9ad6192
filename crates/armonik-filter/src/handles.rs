//! Typed field handles.
//!
//! A handle wraps a [`FieldRef`] whose type tag is known statically. It only
//! exposes the operators legal for that tag and only accepts values of the
//! matching Rust type, so its constructors cannot fail and return a
//! [`Filter`] directly:
//!
//! ```
//! use armonik_filter_rs::{Task, Filter};
//! use armonik_api_rs::models::TaskStatus;
//!
//! let done: Filter = Task::status().eq(TaskStatus::Completed);
//! let urgent: Filter = Task::options().priority().gt(3);
//! let both = (done & urgent).unwrap();
//! assert_eq!(both.to_string(), "status == COMPLETED & options.priority > 3");
//! ```

use std::marker::PhantomData;

use armonik_api_rs::filters::StatusValue;
use armonik_api_rs::models::{Duration, Timestamp};
use armonik_api_rs::request::{Sort, SortDirection};

use crate::expr::Filter;
use crate::field::FieldRef;
use crate::leaf::Leaf;
use crate::operator::Operator;
use crate::value::Value;

fn leaf(field: &FieldRef, operator: Operator, value: Value) -> Filter {
    Filter::Leaf(Leaf::new_unchecked(field.clone(), operator, value))
}

macro_rules! handle_common {
    ($handle:ident) => {
        impl $handle {
            /// Returns the untyped field reference.
            pub fn field(&self) -> &FieldRef {
                &self.0
            }

            /// Returns a sort key on this field.
            pub fn sort(&self, direction: SortDirection) -> Sort {
                self.0.sort(direction)
            }
        }

        impl From<$handle> for FieldRef {
            fn from(handle: $handle) -> Self {
                handle.0
            }
        }
    };
}

macro_rules! ordered_handle {
    ($(#[$meta:meta])* $handle:ident, $input:ty, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $handle(FieldRef);

        impl $handle {
            pub(crate) fn new(field: FieldRef) -> Self {
                Self(field)
            }

            pub fn eq(&self, value: impl Into<$input>) -> Filter {
                leaf(&self.0, Operator::Equal, Value::$variant(value.into()))
            }

            pub fn ne(&self, value: impl Into<$input>) -> Filter {
                leaf(&self.0, Operator::NotEqual, Value::$variant(value.into()))
            }

            pub fn lt(&self, value: impl Into<$input>) -> Filter {
                leaf(&self.0, Operator::LessThan, Value::$variant(value.into()))
            }

            pub fn le(&self, value: impl Into<$input>) -> Filter {
                leaf(&self.0, Operator::LessOrEqual, Value::$variant(value.into()))
            }

            pub fn gt(&self, value: impl Into<$input>) -> Filter {
                leaf(&self.0, Operator::GreaterThan, Value::$variant(value.into()))
            }

            pub fn ge(&self, value: impl Into<$input>) -> Filter {
                leaf(&self.0, Operator::GreaterOrEqual, Value::$variant(value.into()))
            }
        }

        handle_common!($handle);
    };
}

/// A STRING field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringField(FieldRef);

impl StringField {
    pub(crate) fn new(field: FieldRef) -> Self {
        Self(field)
    }

    pub fn eq(&self, value: impl Into<String>) -> Filter {
        leaf(&self.0, Operator::Equal, Value::String(value.into()))
    }

    pub fn ne(&self, value: impl Into<String>) -> Filter {
        leaf(&self.0, Operator::NotEqual, Value::String(value.into()))
    }

    pub fn contains(&self, value: impl Into<String>) -> Filter {
        leaf(&self.0, Operator::Contains, Value::String(value.into()))
    }

    pub fn not_contains(&self, value: impl Into<String>) -> Filter {
        leaf(&self.0, Operator::NotContains, Value::String(value.into()))
    }

    /// Prefix match. Filters using it cannot be negated.
    pub fn starts_with(&self, value: impl Into<String>) -> Filter {
        leaf(&self.0, Operator::StartsWith, Value::String(value.into()))
    }

    /// Suffix match. Filters using it cannot be negated.
    pub fn ends_with(&self, value: impl Into<String>) -> Filter {
        leaf(&self.0, Operator::EndsWith, Value::String(value.into()))
    }
}

handle_common!(StringField);

ordered_handle!(
    /// A NUMBER field.
    NumberField,
    i64,
    Number
);

ordered_handle!(
    /// A DATE field. Accepts `DateTime<Utc>` or [`Timestamp`].
    DateField,
    Timestamp,
    Date
);

ordered_handle!(
    /// A DURATION field. Accepts `chrono::TimeDelta`, `std::time::Duration`
    /// or the wire [`Duration`].
    DurationField,
    Duration,
    Duration
);

/// A STATUS field whose values are the status enum `S` of its entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusField<S> {
    field: FieldRef,
    status: PhantomData<S>,
}

impl<S: Into<StatusValue>> StatusField<S> {
    pub(crate) fn new(field: FieldRef) -> Self {
        Self {
            field,
            status: PhantomData,
        }
    }

    pub fn eq(&self, status: S) -> Filter {
        leaf(&self.field, Operator::Equal, Value::Status(status.into()))
    }

    pub fn ne(&self, status: S) -> Filter {
        leaf(&self.field, Operator::NotEqual, Value::Status(status.into()))
    }

    /// Returns the untyped field reference.
    pub fn field(&self) -> &FieldRef {
        &self.field
    }

    /// Returns a sort key on this field.
    pub fn sort(&self, direction: SortDirection) -> Sort {
        self.field.sort(direction)
    }
}

impl<S> From<StatusField<S>> for FieldRef {
    fn from(handle: StatusField<S>) -> Self {
        handle.field
    }
}

/// A BOOLEAN field. The only operator is `IS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanField(FieldRef);

impl BooleanField {
    pub(crate) fn new(field: FieldRef) -> Self {
        Self(field)
    }

    pub fn is(&self, value: bool) -> Filter {
        leaf(&self.0, Operator::Is, Value::Boolean(value))
    }

    /// Same as [`BooleanField::is`].
    pub fn eq(&self, value: bool) -> Filter {
        self.is(value)
    }

    /// `!= v` is `is !v`.
    pub fn ne(&self, value: bool) -> Filter {
        self.is(!value)
    }
}

handle_common!(BooleanField);

/// A bare boolean field reads as `field is true`.
impl From<BooleanField> for Filter {
    fn from(handle: BooleanField) -> Self {
        handle.is(true)
    }
}

/// An ARRAY field; comparisons test membership of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayField(FieldRef);

impl ArrayField {
    pub(crate) fn new(field: FieldRef) -> Self {
        Self(field)
    }

    pub fn contains(&self, element: impl Into<String>) -> Filter {
        leaf(&self.0, Operator::Contains, Value::String(element.into()))
    }

    pub fn not_contains(&self, element: impl Into<String>) -> Filter {
        leaf(&self.0, Operator::NotContains, Value::String(element.into()))
    }
}

handle_common!(ArrayField);
