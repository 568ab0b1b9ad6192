//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the armonik-api crate,
//! making it easy for library consumers to import everything they need with a single
//! use statement.
//!
//! # Example
//!
//! ```
//! use armonik_api_rs::prelude::*;
//!
//! let request = ListRequest::default();
//! assert!(request.filters.or.is_empty());
//! ```

// Configuration
pub use crate::config::ClientConfig;

// Error types
pub use crate::error::{ConfigError, ConfigResult};

// Wire filter messages
pub use crate::fields::{FieldDescriptor, FieldName};
pub use crate::filters::{
    FilterArray, FilterArrayOperator, FilterBoolean, FilterBooleanOperator, FilterDate,
    FilterDateOperator, FilterDuration, FilterDurationOperator, FilterField, FilterNumber,
    FilterNumberOperator, FilterPayload, FilterStatus, FilterStatusOperator, FilterString,
    FilterStringOperator, Filters, FiltersAnd, StatusValue,
};

// List requests
pub use crate::request::{ListRequest, Sort, SortDirection};

// Common model types
pub use crate::models::{Duration, ResultStatus, SessionStatus, TaskStatus, Timestamp};
