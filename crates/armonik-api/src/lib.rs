//! ArmoniK API wire model
//!
//! Plain data types exchanged with the ArmoniK control plane: field
//! descriptors, filter messages in disjunctive normal form, entity statuses,
//! time encodings and the list request envelope. Building filters is the job
//! of `armonik-filter-rs`; this crate only defines what goes on the wire.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use armonik_api_rs::prelude::*;
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod filters;
pub mod models;
pub mod prelude;
pub mod request;
