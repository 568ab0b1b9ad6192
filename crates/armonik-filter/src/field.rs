//! Entity kinds, type tags and field references.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use armonik_api_rs::fields::FieldDescriptor;
use armonik_api_rs::request::{Sort, SortDirection};

use crate::error::{FilterError, FilterResult};
use crate::expr::Filter;
use crate::leaf::Leaf;
use crate::operator::Operator;
use crate::value::Value;

/// The kind of record a field belongs to.
///
/// This is also the compatibility class of expressions: only expressions over
/// the same entity kind can be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Task,
    Session,
    Result,
    Partition,
    Application,
}

impl Entity {
    /// Every entity kind.
    pub const ALL: &'static [Entity] = &[
        Entity::Task,
        Entity::Session,
        Entity::Result,
        Entity::Partition,
        Entity::Application,
    ];

    /// Returns the display name, e.g. `Task`.
    pub const fn name(self) -> &'static str {
        match self {
            Entity::Task => "Task",
            Entity::Session => "Session",
            Entity::Result => "Result",
            Entity::Partition => "Partition",
            Entity::Application => "Application",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an entity name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity '{0}' (expected task, session, result, partition or application)")]
pub struct ParseEntityError(pub String);

impl FromStr for Entity {
    type Err = ParseEntityError;

    /// Case-insensitive; plural forms (`tasks`) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        Entity::ALL
            .iter()
            .copied()
            .find(|entity| entity.name().eq_ignore_ascii_case(singular))
            .ok_or_else(|| ParseEntityError(s.to_string()))
    }
}

/// The declared value kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Number,
    Date,
    Duration,
    Status,
    Boolean,
    Array,
}

const STRING_OPERATORS: &[Operator] = &[
    Operator::Equal,
    Operator::NotEqual,
    Operator::Contains,
    Operator::NotContains,
    Operator::StartsWith,
    Operator::EndsWith,
];

const ORDERED_OPERATORS: &[Operator] = &[
    Operator::Equal,
    Operator::NotEqual,
    Operator::LessThan,
    Operator::LessOrEqual,
    Operator::GreaterThan,
    Operator::GreaterOrEqual,
];

const STATUS_OPERATORS: &[Operator] = &[Operator::Equal, Operator::NotEqual];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::Is];

const ARRAY_OPERATORS: &[Operator] = &[Operator::Contains, Operator::NotContains];

impl FieldType {
    /// Returns the operators a leaf on a field of this type may use.
    pub const fn operators(self) -> &'static [Operator] {
        match self {
            FieldType::String => STRING_OPERATORS,
            FieldType::Number | FieldType::Date | FieldType::Duration => ORDERED_OPERATORS,
            FieldType::Status => STATUS_OPERATORS,
            FieldType::Boolean => BOOLEAN_OPERATORS,
            FieldType::Array => ARRAY_OPERATORS,
        }
    }

    /// Returns true if `operator` is legal for this type.
    pub fn supports(self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    /// Returns the upper-case tag, e.g. `DURATION`.
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Number => "NUMBER",
            FieldType::Date => "DATE",
            FieldType::Duration => "DURATION",
            FieldType::Status => "STATUS",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Array => "ARRAY",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable reference to one filterable field of one entity kind.
///
/// Field references are normally obtained from the registry
/// ([`crate::registry`]) or from the typed entity accessors such as
/// [`crate::Task::status`]. Comparisons built from a `FieldRef` are checked at
/// run time; the typed handles in [`crate::handles`] check them at compile
/// time instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    entity: Entity,
    name: Cow<'static, str>,
    descriptor: FieldDescriptor,
    field_type: FieldType,
}

impl FieldRef {
    /// Creates a field reference.
    pub fn new(
        entity: Entity,
        name: impl Into<Cow<'static, str>>,
        descriptor: FieldDescriptor,
        field_type: FieldType,
    ) -> Self {
        Self {
            entity,
            name: name.into(),
            descriptor,
            field_type,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The user-facing path, e.g. `status` or `options.priority`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Builds a leaf comparing this field with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedOperator`] if `operator` is not legal
    /// for the field's type and [`FilterError::TypeMismatch`] if `value` has
    /// the wrong kind.
    pub fn compare(&self, operator: Operator, value: impl Into<Value>) -> FilterResult<Filter> {
        Leaf::new(self.clone(), operator, value).map(Filter::Leaf)
    }

    pub fn eq(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::Equal, value)
    }

    pub fn ne(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::NotEqual, value)
    }

    pub fn lt(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::LessThan, value)
    }

    pub fn le(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::LessOrEqual, value)
    }

    pub fn gt(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::GreaterThan, value)
    }

    pub fn ge(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::GreaterOrEqual, value)
    }

    pub fn contains(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::Contains, value)
    }

    pub fn not_contains(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::NotContains, value)
    }

    pub fn starts_with(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::StartsWith, value)
    }

    pub fn ends_with(&self, value: impl Into<Value>) -> FilterResult<Filter> {
        self.compare(Operator::EndsWith, value)
    }

    /// Boolean check. Only legal on BOOLEAN fields.
    pub fn is(&self, value: bool) -> FilterResult<Filter> {
        self.compare(Operator::Is, value)
    }

    /// Returns a sort key on this field.
    pub fn sort(&self, direction: SortDirection) -> Sort {
        Sort {
            field: self.descriptor.clone(),
            direction,
        }
    }

    /// Returns the `Entity.name` label used in error messages.
    pub(crate) fn label(&self) -> String {
        format!("{}.{}", self.entity, self.name)
    }

    pub(crate) fn type_mismatch(&self, found: &Value) -> FilterError {
        let expected = match self.field_type {
            FieldType::Status => format!("{} status", self.entity),
            FieldType::Array => "string element".to_string(),
            other => other.name().to_lowercase(),
        };
        FilterError::TypeMismatch {
            field: self.label(),
            expected,
            found: found.kind_name().to_string(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
