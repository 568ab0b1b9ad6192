//! Data types shared by every entity of the ArmoniK API.
//!
//! Statuses and time encodings appear both in entity payloads and in filter
//! values, so they live here rather than next to the filter messages.

mod status;
mod time;

pub use status::*;
pub use time::*;
