//! Leaf comparisons.

use std::fmt;

use crate::error::{FilterError, FilterResult};
use crate::field::{Entity, FieldRef, FieldType};
use crate::operator::Operator;
use crate::value::Value;

/// A single comparison `field <operator> value`.
///
/// A `Leaf` can only be obtained through a checked constructor, so every leaf
/// satisfies: the operator is legal for the field's type and the value has the
/// field's kind. Boolean leaves always use [`Operator::Is`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leaf {
    field: FieldRef,
    operator: Operator,
    value: Value,
}

impl Leaf {
    /// Builds a checked leaf.
    ///
    /// On BOOLEAN fields `==` and `!=` are accepted as sugar: `== v` becomes
    /// `is v` and `!= v` becomes `is !v`.
    ///
    /// # Errors
    ///
    /// [`FilterError::UnsupportedOperator`] when the operator is not legal for
    /// the field's type, then [`FilterError::TypeMismatch`] when the value kind
    /// does not fit.
    pub fn new(field: FieldRef, operator: Operator, value: impl Into<Value>) -> FilterResult<Self> {
        let mut operator = operator;
        let mut value = value.into();

        if field.field_type() == FieldType::Boolean {
            match (operator, &value) {
                (Operator::Equal, Value::Boolean(_)) => operator = Operator::Is,
                (Operator::NotEqual, Value::Boolean(b)) => {
                    operator = Operator::Is;
                    value = Value::Boolean(!*b);
                }
                _ => {}
            }
        }

        if !field.field_type().supports(operator) {
            return Err(FilterError::UnsupportedOperator {
                field: field.label(),
                field_type: field.field_type(),
                operator,
            });
        }
        if !value.fits(field.field_type(), field.entity()) {
            return Err(field.type_mismatch(&value));
        }

        Ok(Self::new_unchecked(field, operator, value))
    }

    /// Builds a leaf whose legality is guaranteed by the caller's types.
    pub(crate) fn new_unchecked(field: FieldRef, operator: Operator, value: Value) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }

    pub fn field(&self) -> &FieldRef {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn entity(&self) -> Entity {
        self.field.entity()
    }

    /// Returns the complementary leaf.
    ///
    /// Boolean leaves flip their value; other leaves swap their operator for
    /// its inverse.
    ///
    /// # Errors
    ///
    /// [`FilterError::NotInvertible`] for `STARTS_WITH` and `ENDS_WITH`.
    pub fn negate(&self) -> FilterResult<Leaf> {
        if let (Operator::Is, Value::Boolean(b)) = (self.operator, &self.value) {
            return Ok(Self::new_unchecked(
                self.field.clone(),
                Operator::Is,
                Value::Boolean(!*b),
            ));
        }

        match self.operator.inverse() {
            Some(inverse) => Ok(Self::new_unchecked(
                self.field.clone(),
                inverse,
                self.value.clone(),
            )),
            None => Err(FilterError::NotInvertible {
                leaf: self.to_string(),
                operator: self.operator,
            }),
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator.symbol(), self.value)
    }
}
