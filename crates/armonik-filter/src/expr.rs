//! Filter expressions and the combinator algebra.
//!
//! Every expression is kept in disjunctive normal form. Combinators flatten
//! eagerly:
//!
//! - `a & b` is the cartesian product of the conjunctions of `a` and `b`,
//!   left-major: `(a1 | a2) & (b1 | b2)` is `a1&b1 | a1&b2 | a2&b1 | a2&b2`.
//! - `a | b` concatenates the conjunctions of `a` and `b`.
//! - `!a` applies De Morgan twice: a conjunction becomes the disjunction of
//!   its negated leaves, and a disjunction becomes the product of its negated
//!   conjunctions.
//! - `a ^ b` is `(a & !b) | (!a & b)`.
//!
//! The result of a combinator is reduced to its simplest shape: one
//! conjunction holding one leaf is a [`Filter::Leaf`], a single conjunction is
//! a [`Filter::Conjunction`].
//!
//! Operators are overloaded on `Filter` and `&Filter`. Since combination can
//! fail, they return [`FilterResult<Filter>`]:
//!
//! ```
//! use armonik_filter_rs::Session;
//! use armonik_api_rs::models::SessionStatus;
//!
//! let running = Session::status().eq(SessionStatus::Running);
//! let paused = Session::status().eq(SessionStatus::Paused);
//! let either = (&running | &paused).unwrap();
//! let neither = (!either).unwrap();
//! assert_eq!(neither.to_string(), "status != RUNNING & status != PAUSED");
//! ```

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not};

use tracing::{debug, warn};

use crate::error::{FilterError, FilterResult};
use crate::field::Entity;
use crate::leaf::Leaf;

/// Number of conjunctions above which an expansion is reported.
///
/// Products are always computed exactly; this only controls the warning.
pub const LARGE_EXPANSION_THRESHOLD: usize = 4096;

/// A non-empty logical AND of leaves over one entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Conjunction {
    entity: Entity,
    leaves: Vec<Leaf>,
}

impl Conjunction {
    fn single(leaf: Leaf) -> Self {
        Self {
            entity: leaf.entity(),
            leaves: vec![leaf],
        }
    }

    fn concat(&self, other: &Conjunction) -> Self {
        let mut leaves = Vec::with_capacity(self.leaves.len() + other.leaves.len());
        leaves.extend_from_slice(&self.leaves);
        leaves.extend_from_slice(&other.leaves);
        Self {
            entity: self.entity,
            leaves,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Always false; a conjunction holds at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// `!(l1 & l2 & ...)` is `!l1 | !l2 | ...`.
    fn negate(&self) -> FilterResult<Vec<Conjunction>> {
        self.leaves
            .iter()
            .map(|leaf| leaf.negate().map(Conjunction::single))
            .collect()
    }
}

/// A non-empty logical OR of conjunctions over one entity kind.
///
/// This is the canonical form every non-empty expression promotes to and the
/// shape that is compiled to the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Disjunction {
    entity: Entity,
    conjunctions: Vec<Conjunction>,
}

impl Disjunction {
    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn conjunctions(&self) -> &[Conjunction] {
        &self.conjunctions
    }

    pub fn len(&self) -> usize {
        self.conjunctions.len()
    }

    /// Always false; a disjunction holds at least one conjunction.
    pub fn is_empty(&self) -> bool {
        self.conjunctions.is_empty()
    }
}

/// A filter expression over one entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// No comparison yet. It cannot be combined, inverted or compiled.
    Empty(Entity),
    Leaf(Leaf),
    Conjunction(Conjunction),
    Disjunction(Disjunction),
}

impl Filter {
    /// Returns the empty expression of an entity kind.
    pub fn empty(entity: Entity) -> Self {
        Filter::Empty(entity)
    }

    /// Returns the entity kind, which is also the compatibility class.
    pub fn entity(&self) -> Entity {
        match self {
            Filter::Empty(entity) => *entity,
            Filter::Leaf(leaf) => leaf.entity(),
            Filter::Conjunction(conjunction) => conjunction.entity,
            Filter::Disjunction(disjunction) => disjunction.entity,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Filter::Empty(_))
    }

    /// Returns the number of conjunctions of the normal form (0 when empty).
    pub fn conjunction_count(&self) -> usize {
        match self {
            Filter::Empty(_) => 0,
            Filter::Leaf(_) | Filter::Conjunction(_) => 1,
            Filter::Disjunction(disjunction) => disjunction.conjunctions.len(),
        }
    }

    /// Returns the total number of leaves of the normal form.
    pub fn leaf_count(&self) -> usize {
        match self {
            Filter::Empty(_) => 0,
            Filter::Leaf(_) => 1,
            Filter::Conjunction(conjunction) => conjunction.leaves.len(),
            Filter::Disjunction(disjunction) => {
                disjunction.conjunctions.iter().map(Conjunction::len).sum()
            }
        }
    }

    /// Promotes to the canonical disjunction without changing meaning.
    ///
    /// # Errors
    ///
    /// [`FilterError::EmptyFilter`] for an empty expression.
    pub fn to_disjunction(&self) -> FilterResult<Disjunction> {
        let conjunctions = self.conjunctions()?;
        Ok(Disjunction {
            entity: self.entity(),
            conjunctions,
        })
    }

    fn conjunctions(&self) -> FilterResult<Vec<Conjunction>> {
        match self {
            Filter::Empty(entity) => Err(FilterError::EmptyFilter { entity: *entity }),
            Filter::Leaf(leaf) => Ok(vec![Conjunction::single(leaf.clone())]),
            Filter::Conjunction(conjunction) => Ok(vec![conjunction.clone()]),
            Filter::Disjunction(disjunction) => Ok(disjunction.conjunctions.clone()),
        }
    }

    /// Rebuilds the simplest expression for a non-empty list of conjunctions.
    fn from_conjunctions(entity: Entity, mut conjunctions: Vec<Conjunction>) -> Filter {
        if conjunctions.len() == 1 {
            let conjunction = conjunctions.remove(0);
            if conjunction.leaves.len() == 1 {
                return conjunction.leaves.into_iter().next().map_or(
                    Filter::Empty(entity),
                    Filter::Leaf,
                );
            }
            return Filter::Conjunction(conjunction);
        }
        if conjunctions.is_empty() {
            return Filter::Empty(entity);
        }
        Filter::Disjunction(Disjunction {
            entity,
            conjunctions,
        })
    }

    fn check_compatible(&self, other: &Filter) -> FilterResult<()> {
        if self.entity() == other.entity() {
            Ok(())
        } else {
            Err(FilterError::IncompatibleFilterTypes {
                left: self.entity(),
                right: other.entity(),
            })
        }
    }

    /// Logical AND.
    ///
    /// # Errors
    ///
    /// [`FilterError::IncompatibleFilterTypes`] when the entity kinds differ,
    /// [`FilterError::EmptyFilter`] when either side is empty.
    pub fn and(&self, other: &Filter) -> FilterResult<Filter> {
        self.check_compatible(other)?;
        let left = self.conjunctions()?;
        let right = other.conjunctions()?;
        let product = product(&left, &right);
        debug!(
            entity = %self.entity(),
            left = left.len(),
            right = right.len(),
            result = product.len(),
            "and"
        );
        Ok(Filter::from_conjunctions(self.entity(), product))
    }

    /// Logical OR.
    ///
    /// # Errors
    ///
    /// Same as [`Filter::and`].
    pub fn or(&self, other: &Filter) -> FilterResult<Filter> {
        self.check_compatible(other)?;
        let mut conjunctions = self.conjunctions()?;
        conjunctions.extend(other.conjunctions()?);
        debug!(entity = %self.entity(), result = conjunctions.len(), "or");
        Ok(Filter::from_conjunctions(self.entity(), conjunctions))
    }

    /// Logical NOT.
    ///
    /// # Errors
    ///
    /// [`FilterError::EmptyFilter`] for an empty expression and
    /// [`FilterError::NotInvertible`] naming the first leaf whose operator has
    /// no complement.
    pub fn negate(&self) -> FilterResult<Filter> {
        let entity = self.entity();
        let conjunctions = match self {
            Filter::Empty(entity) => return Err(FilterError::EmptyFilter { entity: *entity }),
            Filter::Leaf(leaf) => return leaf.negate().map(Filter::Leaf),
            Filter::Conjunction(conjunction) => conjunction.negate()?,
            Filter::Disjunction(disjunction) => {
                let mut negated = disjunction.conjunctions.iter().map(Conjunction::negate);
                let mut acc = match negated.next() {
                    Some(first) => first?,
                    None => return Err(FilterError::EmptyFilter { entity }),
                };
                for next in negated {
                    acc = product(&acc, &next?);
                }
                acc
            }
        };
        debug!(entity = %entity, result = conjunctions.len(), "not");
        Ok(Filter::from_conjunctions(entity, conjunctions))
    }

    /// Exclusive OR: `(a & !b) | (!a & b)`.
    ///
    /// # Errors
    ///
    /// Any error of [`Filter::and`], [`Filter::or`] or [`Filter::negate`].
    pub fn xor(&self, other: &Filter) -> FilterResult<Filter> {
        self.check_compatible(other)?;
        for side in [self, other] {
            if let Filter::Empty(entity) = side {
                return Err(FilterError::EmptyFilter { entity: *entity });
            }
        }
        let left = self.and(&other.negate()?)?;
        let right = self.negate()?.and(other)?;
        left.or(&right)
    }

    /// Compares the expression with a boolean: `f.is(true)` is `f` and
    /// `f.is(false)` is `!f`.
    ///
    /// # Errors
    ///
    /// [`FilterError::EmptyFilter`] for an empty expression, or any error of
    /// [`Filter::negate`].
    pub fn is(&self, value: bool) -> FilterResult<Filter> {
        if let Filter::Empty(entity) = self {
            return Err(FilterError::EmptyFilter { entity: *entity });
        }
        if value {
            Ok(self.clone())
        } else {
            self.negate()
        }
    }
}

/// Pairwise concatenation, left-major.
fn product(left: &[Conjunction], right: &[Conjunction]) -> Vec<Conjunction> {
    let mut result = Vec::with_capacity(left.len().saturating_mul(right.len()));
    for a in left {
        for b in right {
            result.push(a.concat(b));
        }
    }
    if result.len() > LARGE_EXPANSION_THRESHOLD {
        warn!(
            conjunctions = result.len(),
            threshold = LARGE_EXPANSION_THRESHOLD,
            "filter expansion produced a large disjunction"
        );
    }
    result
}

impl From<Leaf> for Filter {
    fn from(leaf: Leaf) -> Self {
        Filter::Leaf(leaf)
    }
}

impl From<Conjunction> for Filter {
    fn from(conjunction: Conjunction) -> Self {
        Filter::from_conjunctions(conjunction.entity, vec![conjunction])
    }
}

impl From<Disjunction> for Filter {
    fn from(disjunction: Disjunction) -> Self {
        Filter::from_conjunctions(disjunction.entity, disjunction.conjunctions)
    }
}

/// Filters never coerce to `bool`; use the combinators instead.
impl TryFrom<&Filter> for bool {
    type Error = FilterError;

    fn try_from(_: &Filter) -> Result<Self, Self::Error> {
        Err(FilterError::NotBoolean)
    }
}

impl TryFrom<Filter> for bool {
    type Error = FilterError;

    fn try_from(filter: Filter) -> Result<Self, Self::Error> {
        bool::try_from(&filter)
    }
}

// ==================== Operator Overloads ====================

macro_rules! binary_op {
    ($trait:ident, $method:ident, $combinator:ident) => {
        impl $trait for Filter {
            type Output = FilterResult<Filter>;

            fn $method(self, rhs: Filter) -> Self::Output {
                self.$combinator(&rhs)
            }
        }

        impl $trait<&Filter> for Filter {
            type Output = FilterResult<Filter>;

            fn $method(self, rhs: &Filter) -> Self::Output {
                self.$combinator(rhs)
            }
        }

        impl $trait<Filter> for &Filter {
            type Output = FilterResult<Filter>;

            fn $method(self, rhs: Filter) -> Self::Output {
                self.$combinator(&rhs)
            }
        }

        impl $trait<&Filter> for &Filter {
            type Output = FilterResult<Filter>;

            fn $method(self, rhs: &Filter) -> Self::Output {
                self.$combinator(rhs)
            }
        }
    };
}

binary_op!(BitAnd, bitand, and);
binary_op!(Mul, mul, and);
binary_op!(BitOr, bitor, or);
binary_op!(Add, add, or);
binary_op!(BitXor, bitxor, xor);

macro_rules! unary_op {
    ($trait:ident, $method:ident) => {
        impl $trait for Filter {
            type Output = FilterResult<Filter>;

            fn $method(self) -> Self::Output {
                self.negate()
            }
        }

        impl $trait for &Filter {
            type Output = FilterResult<Filter>;

            fn $method(self) -> Self::Output {
                self.negate()
            }
        }
    };
}

unary_op!(Not, not);
unary_op!(Neg, neg);

// ==================== Display ====================

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, leaf) in self.leaves.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{leaf}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Disjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conjunction) in self.conjunctions.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            if conjunction.len() > 1 && self.conjunctions.len() > 1 {
                write!(f, "({conjunction})")?;
            } else {
                write!(f, "{conjunction}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Empty(entity) => write!(f, "<empty {entity} filter>"),
            Filter::Leaf(leaf) => write!(f, "{leaf}"),
            Filter::Conjunction(conjunction) => write!(f, "{conjunction}"),
            Filter::Disjunction(disjunction) => write!(f, "{disjunction}"),
        }
    }
}
