//! Field descriptors: the wire identifiers of entity attributes.
//!
//! A descriptor names one attribute of one entity kind in the shape the
//! control plane expects, e.g. `{"task_summary_field": {"field":
//! "TASK_SUMMARY_ENUM_FIELD_STATUS"}}`. The filter layer carries descriptors
//! through unchanged; it never interprets the inner names.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The inner `{ "field": ... }` object of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldName {
    /// Enum name of the field, or the user key for generic option fields.
    pub field: Cow<'static, str>,
}

/// Identifies an attribute of an entity on the wire.
///
/// One variant per wire family; variants sharing a prefix (`task_*`) belong to
/// the same entity message family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDescriptor {
    /// A column of the task summary (`TASK_SUMMARY_ENUM_FIELD_*`).
    TaskSummaryField(FieldName),
    /// A well-known task option (`TASK_OPTION_ENUM_FIELD_*`).
    TaskOptionField(FieldName),
    /// A user-defined entry of the task options dictionary.
    TaskOptionGenericField(FieldName),
    /// A column of the session table (`SESSION_RAW_ENUM_FIELD_*`).
    SessionRawField(FieldName),
    /// A column of the result table (`RESULT_RAW_ENUM_FIELD_*`).
    ResultRawField(FieldName),
    /// A column of the partition table (`PARTITION_RAW_ENUM_FIELD_*`).
    PartitionRawField(FieldName),
    /// A column of the application view (`APPLICATION_RAW_ENUM_FIELD_*`).
    ApplicationField(FieldName),
}

impl FieldDescriptor {
    /// Builds a task summary descriptor from a static enum name.
    pub const fn task_summary(field: &'static str) -> Self {
        FieldDescriptor::TaskSummaryField(FieldName {
            field: Cow::Borrowed(field),
        })
    }

    /// Builds a task option descriptor from a static enum name.
    pub const fn task_option(field: &'static str) -> Self {
        FieldDescriptor::TaskOptionField(FieldName {
            field: Cow::Borrowed(field),
        })
    }

    /// Builds a generic task option descriptor from a user key.
    pub fn task_option_generic(key: impl Into<String>) -> Self {
        FieldDescriptor::TaskOptionGenericField(FieldName {
            field: Cow::Owned(key.into()),
        })
    }

    /// Builds a session descriptor from a static enum name.
    pub const fn session_raw(field: &'static str) -> Self {
        FieldDescriptor::SessionRawField(FieldName {
            field: Cow::Borrowed(field),
        })
    }

    /// Builds a result descriptor from a static enum name.
    pub const fn result_raw(field: &'static str) -> Self {
        FieldDescriptor::ResultRawField(FieldName {
            field: Cow::Borrowed(field),
        })
    }

    /// Builds a partition descriptor from a static enum name.
    pub const fn partition_raw(field: &'static str) -> Self {
        FieldDescriptor::PartitionRawField(FieldName {
            field: Cow::Borrowed(field),
        })
    }

    /// Builds an application descriptor from a static enum name.
    pub const fn application(field: &'static str) -> Self {
        FieldDescriptor::ApplicationField(FieldName {
            field: Cow::Borrowed(field),
        })
    }

    /// Returns the inner field name.
    pub fn name(&self) -> &str {
        match self {
            FieldDescriptor::TaskSummaryField(f)
            | FieldDescriptor::TaskOptionField(f)
            | FieldDescriptor::TaskOptionGenericField(f)
            | FieldDescriptor::SessionRawField(f)
            | FieldDescriptor::ResultRawField(f)
            | FieldDescriptor::PartitionRawField(f)
            | FieldDescriptor::ApplicationField(f) => &f.field,
        }
    }

    /// Returns the serde tag of this descriptor's wire family.
    pub fn family(&self) -> &'static str {
        match self {
            FieldDescriptor::TaskSummaryField(_) => "task_summary_field",
            FieldDescriptor::TaskOptionField(_) => "task_option_field",
            FieldDescriptor::TaskOptionGenericField(_) => "task_option_generic_field",
            FieldDescriptor::SessionRawField(_) => "session_raw_field",
            FieldDescriptor::ResultRawField(_) => "result_raw_field",
            FieldDescriptor::PartitionRawField(_) => "partition_raw_field",
            FieldDescriptor::ApplicationField(_) => "application_field",
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.family(), self.name())
    }
}
