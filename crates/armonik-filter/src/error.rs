//! Error types for building and combining filters.

use thiserror::Error;

use crate::field::{Entity, FieldType};
use crate::operator::Operator;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while building, combining or compiling filter expressions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The comparison value does not match the field's type tag.
    #[error("type mismatch on {field}: expected {expected} value, got {found}")]
    TypeMismatch {
        /// The field, as `Entity.name`.
        field: String,
        /// The expected value kind.
        expected: String,
        /// The kind of the value that was supplied.
        found: String,
    },

    /// The operator is not legal for the field's type tag.
    #[error("operator {operator} is not supported on {field} ({field_type} field)")]
    UnsupportedOperator {
        field: String,
        field_type: FieldType,
        operator: Operator,
    },

    /// No field with this name exists on the entity.
    #[error("unknown field '{field}' on {entity}{}", suggestion_hint(.suggestion))]
    UnknownField {
        entity: Entity,
        field: String,
        /// The closest known field name, if one is close enough.
        suggestion: Option<String>,
    },

    /// The field exists but cannot be used in a filter.
    #[error("field '{field}' on {entity} is not filterable")]
    FieldNotFilterable { entity: Entity, field: String },

    /// The operands belong to different entity kinds.
    #[error("cannot combine a {left} filter with a {right} filter")]
    IncompatibleFilterTypes { left: Entity, right: Entity },

    /// The expression contains a leaf whose operator has no complement.
    #[error("cannot invert '{leaf}': operator {operator} has no complement")]
    NotInvertible {
        /// The offending leaf, rendered.
        leaf: String,
        operator: Operator,
    },

    /// The expression is empty where a non-empty one is required.
    #[error("empty {entity} filter: build a comparison on one of its fields first")]
    EmptyFilter { entity: Entity },

    /// A filter was used where a plain boolean was expected.
    #[error("a filter is not a boolean; combine filters with '&', '|' and '!' instead of 'and', 'or' and 'not'")]
    NotBoolean,
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(". Did you mean '{}'?", name),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates an unknown field error.
    pub fn unknown_field(
        entity: Entity,
        field: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        FilterError::UnknownField {
            entity,
            field: field.into(),
            suggestion,
        }
    }

    /// Creates a not-filterable error.
    pub fn not_filterable(entity: Entity, field: impl Into<String>) -> Self {
        FilterError::FieldNotFilterable {
            entity,
            field: field.into(),
        }
    }

    /// Returns a stable snake_case code, used by the CLI's JSON errors.
    pub fn code(&self) -> &'static str {
        match self {
            FilterError::TypeMismatch { .. } => "type_mismatch",
            FilterError::UnsupportedOperator { .. } => "unsupported_operator",
            FilterError::UnknownField { .. } => "unknown_field",
            FilterError::FieldNotFilterable { .. } => "field_not_filterable",
            FilterError::IncompatibleFilterTypes { .. } => "incompatible_filter_types",
            FilterError::NotInvertible { .. } => "not_invertible",
            FilterError::EmptyFilter { .. } => "empty_filter",
            FilterError::NotBoolean => "not_boolean",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_with_suggestion() {
        let error = FilterError::unknown_field(Entity::Task, "stauts", Some("status".into()));
        assert_eq!(
            error.to_string(),
            "unknown field 'stauts' on Task. Did you mean 'status'?"
        );
    }

    #[test]
    fn test_unknown_field_without_suggestion() {
        let error = FilterError::unknown_field(Entity::Result, "xyz", None);
        assert_eq!(error.to_string(), "unknown field 'xyz' on Result");
    }

    #[test]
    fn test_incompatible_display_names_both_sides() {
        let error = FilterError::IncompatibleFilterTypes {
            left: Entity::Task,
            right: Entity::Session,
        };
        assert_eq!(
            error.to_string(),
            "cannot combine a Task filter with a Session filter"
        );
        assert_eq!(error.code(), "incompatible_filter_types");
    }
}
