//! Compilation of expressions into the wire [`Filters`] message.

use armonik_api_rs::filters::{
    FilterArray, FilterArrayOperator, FilterBoolean, FilterBooleanOperator, FilterDate,
    FilterDateOperator, FilterDuration, FilterDurationOperator, FilterField, FilterNumber,
    FilterNumberOperator, FilterPayload, FilterStatus, FilterStatusOperator, FilterString,
    FilterStringOperator, Filters, FiltersAnd,
};
use tracing::debug;

use crate::error::{FilterError, FilterResult};
use crate::expr::{Conjunction, Disjunction, Filter};
use crate::field::FieldType;
use crate::leaf::Leaf;
use crate::operator::Operator;
use crate::value::Value;

impl Filter {
    /// Compiles the expression into the wire message.
    ///
    /// # Errors
    ///
    /// [`FilterError::EmptyFilter`] for an empty expression. Any other
    /// expression built through the public API compiles.
    pub fn to_message(&self) -> FilterResult<Filters> {
        let message = self.to_disjunction()?.to_message()?;
        debug!(
            entity = %self.entity(),
            conjunctions = message.or.len(),
            leaves = self.leaf_count(),
            "compiled filter"
        );
        Ok(message)
    }
}

impl Disjunction {
    pub fn to_message(&self) -> FilterResult<Filters> {
        Ok(Filters {
            or: self
                .conjunctions()
                .iter()
                .map(Conjunction::to_message)
                .collect::<FilterResult<_>>()?,
        })
    }
}

impl Conjunction {
    pub fn to_message(&self) -> FilterResult<FiltersAnd> {
        Ok(FiltersAnd {
            and: self
                .leaves()
                .iter()
                .map(Leaf::to_message)
                .collect::<FilterResult<_>>()?,
        })
    }
}

impl Leaf {
    /// Compiles one comparison; the payload is chosen by the field's type.
    ///
    /// # Errors
    ///
    /// Checked leaves always compile. A (type, operator, value) triple with
    /// no wire encoding is reported as [`FilterError::UnsupportedOperator`]
    /// or [`FilterError::TypeMismatch`].
    pub fn to_message(&self) -> FilterResult<FilterField> {
        let field = self.field();
        match payload(field.field_type(), self.operator(), self.value()) {
            Some(payload) => Ok(FilterField {
                field: field.descriptor().clone(),
                payload,
            }),
            None if field.field_type().supports(self.operator()) => {
                Err(field.type_mismatch(self.value()))
            }
            None => Err(FilterError::UnsupportedOperator {
                field: field.label(),
                field_type: field.field_type(),
                operator: self.operator(),
            }),
        }
    }
}

fn payload(field_type: FieldType, operator: Operator, value: &Value) -> Option<FilterPayload> {
    let payload = match (field_type, value) {
        (FieldType::String, Value::String(s)) => FilterPayload::String(FilterString {
            value: s.clone(),
            operator: string_operator(operator)?,
        }),
        (FieldType::Array, Value::String(s)) => FilterPayload::Array(FilterArray {
            value: s.clone(),
            operator: array_operator(operator)?,
        }),
        (FieldType::Number, Value::Number(n)) => FilterPayload::Number(FilterNumber {
            value: *n,
            operator: number_operator(operator)?,
        }),
        (FieldType::Date, Value::Date(ts)) => FilterPayload::Date(FilterDate {
            value: *ts,
            operator: date_operator(operator)?,
        }),
        (FieldType::Duration, Value::Duration(d)) => FilterPayload::Duration(FilterDuration {
            value: *d,
            operator: duration_operator(operator)?,
        }),
        (FieldType::Status, Value::Status(status)) => FilterPayload::Status(FilterStatus {
            value: *status,
            operator: status_operator(operator)?,
        }),
        (FieldType::Boolean, Value::Boolean(b)) => FilterPayload::Boolean(FilterBoolean {
            value: *b,
            operator: boolean_operator(operator)?,
        }),
        _ => return None,
    };
    Some(payload)
}

// The maps below list every operator, so a new one must be placed explicitly.

fn string_operator(operator: Operator) -> Option<FilterStringOperator> {
    Some(match operator {
        Operator::Equal => FilterStringOperator::Equal,
        Operator::NotEqual => FilterStringOperator::NotEqual,
        Operator::Contains => FilterStringOperator::Contains,
        Operator::NotContains => FilterStringOperator::NotContains,
        Operator::StartsWith => FilterStringOperator::StartsWith,
        Operator::EndsWith => FilterStringOperator::EndsWith,
        Operator::LessThan
        | Operator::LessOrEqual
        | Operator::GreaterThan
        | Operator::GreaterOrEqual
        | Operator::Is => return None,
    })
}

fn array_operator(operator: Operator) -> Option<FilterArrayOperator> {
    Some(match operator {
        Operator::Contains => FilterArrayOperator::Contains,
        Operator::NotContains => FilterArrayOperator::NotContains,
        Operator::Equal
        | Operator::NotEqual
        | Operator::LessThan
        | Operator::LessOrEqual
        | Operator::GreaterThan
        | Operator::GreaterOrEqual
        | Operator::StartsWith
        | Operator::EndsWith
        | Operator::Is => return None,
    })
}

fn number_operator(operator: Operator) -> Option<FilterNumberOperator> {
    Some(match operator {
        Operator::Equal => FilterNumberOperator::Equal,
        Operator::NotEqual => FilterNumberOperator::NotEqual,
        Operator::LessThan => FilterNumberOperator::LessThan,
        Operator::LessOrEqual => FilterNumberOperator::LessThanOrEqual,
        Operator::GreaterThan => FilterNumberOperator::GreaterThan,
        Operator::GreaterOrEqual => FilterNumberOperator::GreaterThanOrEqual,
        Operator::Contains
        | Operator::NotContains
        | Operator::StartsWith
        | Operator::EndsWith
        | Operator::Is => return None,
    })
}

fn date_operator(operator: Operator) -> Option<FilterDateOperator> {
    Some(match operator {
        Operator::Equal => FilterDateOperator::Equal,
        Operator::NotEqual => FilterDateOperator::NotEqual,
        Operator::LessThan => FilterDateOperator::Before,
        Operator::LessOrEqual => FilterDateOperator::BeforeOrEqual,
        Operator::GreaterThan => FilterDateOperator::After,
        Operator::GreaterOrEqual => FilterDateOperator::AfterOrEqual,
        Operator::Contains
        | Operator::NotContains
        | Operator::StartsWith
        | Operator::EndsWith
        | Operator::Is => return None,
    })
}

fn duration_operator(operator: Operator) -> Option<FilterDurationOperator> {
    Some(match operator {
        Operator::Equal => FilterDurationOperator::Equal,
        Operator::NotEqual => FilterDurationOperator::NotEqual,
        Operator::LessThan => FilterDurationOperator::ShorterThan,
        Operator::LessOrEqual => FilterDurationOperator::ShorterThanOrEqual,
        Operator::GreaterThan => FilterDurationOperator::LongerThan,
        Operator::GreaterOrEqual => FilterDurationOperator::LongerThanOrEqual,
        Operator::Contains
        | Operator::NotContains
        | Operator::StartsWith
        | Operator::EndsWith
        | Operator::Is => return None,
    })
}

fn status_operator(operator: Operator) -> Option<FilterStatusOperator> {
    Some(match operator {
        Operator::Equal => FilterStatusOperator::Equal,
        Operator::NotEqual => FilterStatusOperator::NotEqual,
        Operator::LessThan
        | Operator::LessOrEqual
        | Operator::GreaterThan
        | Operator::GreaterOrEqual
        | Operator::Contains
        | Operator::NotContains
        | Operator::StartsWith
        | Operator::EndsWith
        | Operator::Is => return None,
    })
}

fn boolean_operator(operator: Operator) -> Option<FilterBooleanOperator> {
    match operator {
        Operator::Is => Some(FilterBooleanOperator::Is),
        Operator::Equal
        | Operator::NotEqual
        | Operator::LessThan
        | Operator::LessOrEqual
        | Operator::GreaterThan
        | Operator::GreaterOrEqual
        | Operator::Contains
        | Operator::NotContains
        | Operator::StartsWith
        | Operator::EndsWith => None,
    }
}
