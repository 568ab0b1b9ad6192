//! Output formatting utilities for the akq CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by command:
//!
//! - [`compile`] - Compiled wire messages
//! - [`fields`] - Field listings (table and JSON)
//! - [`helpers`] - Common formatting utilities (headers, type tags, truncation)

mod compile;
mod fields;
pub mod helpers;

pub use compile::{format_compiled_json, format_message};
pub use fields::{format_fields_json, format_fields_table};
