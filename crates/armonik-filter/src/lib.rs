//! Filter expression algebra for ArmoniK list queries.
//!
//! Build boolean predicates over the fields of tasks, sessions, results,
//! partitions and applications, combine them with `&`, `|`, `^` and `!`, and
//! compile them into the wire [`Filters`] message (an OR of ANDs of leaf
//! comparisons) that the list endpoints accept.
//!
//! # Building filters
//!
//! Typed accessors check operators and value types at compile time:
//!
//! ```
//! use armonik_filter_rs::Task;
//! use armonik_api_rs::models::TaskStatus;
//! use chrono::TimeDelta;
//!
//! let slow_failures = (Task::status().eq(TaskStatus::Error)
//!     & Task::processing_to_end_duration().gt(TimeDelta::minutes(10)))
//! .unwrap();
//! let message = slow_failures.to_message().unwrap();
//! assert_eq!(message.or.len(), 1);
//! assert_eq!(message.or[0].and.len(), 2);
//! ```
//!
//! Fields can also be looked up by name, and whole expressions parsed from
//! text:
//!
//! ```
//! use armonik_filter_rs::{Entity, FieldRegistry, FilterParser};
//!
//! let priority = FieldRegistry::of(Entity::Task).lookup("options.priority").unwrap();
//! let high = priority.gt(5).unwrap();
//!
//! let parsed = FilterParser::parse(Entity::Task, "options.priority > 5").unwrap();
//! assert_eq!(high, parsed);
//! ```
//!
//! # Normal form
//!
//! Every [`Filter`] is kept in disjunctive normal form; see [`expr`] for the
//! combination rules. Operands of a combinator must belong to the same
//! [`Entity`], and the empty filter cannot be combined, negated or compiled.
//!
//! [`Filters`]: armonik_api_rs::filters::Filters

pub mod compile;
pub mod entities;
pub mod error;
pub mod expr;
pub mod field;
pub mod filter;
pub mod handles;
pub mod leaf;
pub mod operator;
pub mod registry;
pub mod request;
pub mod value;

pub use entities::{Application, Partition, Session, SessionOptions, Task, TaskOptions, TaskOutput};
pub use error::{FilterError, FilterResult};
pub use expr::{Conjunction, Disjunction, Filter, LARGE_EXPANSION_THRESHOLD};
pub use field::{Entity, FieldRef, FieldType, ParseEntityError};
pub use filter::{FilterParser, ParseError, ParseResult};
pub use handles::{
    ArrayField, BooleanField, DateField, DurationField, NumberField, StatusField, StringField,
};
pub use leaf::Leaf;
pub use operator::Operator;
pub use registry::{FieldEntry, FieldKind, FieldRegistry, FieldSpec};
pub use request::ListRequestBuilder;
pub use value::Value;

#[cfg(test)]
mod tests;
