//! Lifecycle statuses of tasks, sessions and results.
//!
//! Each status serializes with its protobuf enum name (`TASK_STATUS_COMPLETED`)
//! and parses from either that name or the short form (`completed`),
//! case-insensitively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a status name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} status: {value}")]
pub struct ParseStatusError {
    /// The status family that was being parsed (e.g. "task").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, $prefix:literal {
            $($(#[$vmeta:meta])* $variant:ident = $num:literal => $short:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(i32)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $num,
            )+
        }

        impl $name {
            /// Every status of this family, in wire order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the short upper-case name (e.g. `COMPLETED`).
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $short,)+
                }
            }

            /// Returns the protobuf enum name (e.g. `TASK_STATUS_COMPLETED`).
            pub fn wire_name(self) -> &'static str {
                match self {
                    $($name::$variant => concat!($prefix, $short),)+
                }
            }

            /// Returns the protobuf numeric value.
            pub fn value(self) -> i32 {
                self as i32
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.wire_name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        impl FromStr for $name {
            type Err = ParseStatusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let upper = s.trim().to_ascii_uppercase();
                let short = upper.strip_prefix($prefix).unwrap_or(&upper);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|status| status.name() == short)
                    .ok_or_else(|| ParseStatusError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

status_enum! {
    /// Status of a task.
    TaskStatus, "task", "TASK_STATUS_" {
        /// Status not set.
        #[default]
        Unspecified = 0 => "UNSPECIFIED",
        Creating = 1 => "CREATING",
        Submitted = 2 => "SUBMITTED",
        Dispatched = 3 => "DISPATCHED",
        Completed = 4 => "COMPLETED",
        Error = 5 => "ERROR",
        Timeout = 6 => "TIMEOUT",
        Cancelling = 7 => "CANCELLING",
        Cancelled = 8 => "CANCELLED",
        Processing = 9 => "PROCESSING",
        Processed = 10 => "PROCESSED",
        Retried = 11 => "RETRIED",
        /// Waiting for its dependencies.
        Pending = 12 => "PENDING",
        Paused = 13 => "PAUSED",
    }
}

status_enum! {
    /// Status of a session.
    SessionStatus, "session", "SESSION_STATUS_" {
        #[default]
        Unspecified = 0 => "UNSPECIFIED",
        Running = 1 => "RUNNING",
        Cancelled = 2 => "CANCELLED",
        Paused = 3 => "PAUSED",
        Closed = 4 => "CLOSED",
        Purged = 5 => "PURGED",
        Deleted = 6 => "DELETED",
    }
}

status_enum! {
    /// Status of a result (data object).
    ResultStatus, "result", "RESULT_STATUS_" {
        #[default]
        Unspecified = 0 => "UNSPECIFIED",
        Created = 1 => "CREATED",
        Completed = 2 => "COMPLETED",
        Aborted = 3 => "ABORTED",
        Deleted = 4 => "DELETED",
        /// The result id is not known to the control plane.
        NotFound = 127 => "NOTFOUND",
    }
}
