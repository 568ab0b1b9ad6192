//! Entity schemas and their typed accessors.
//!
//! Every `fields!` block below declares, in one place, the static table used
//! by the [`FieldRegistry`] and a unit struct with one typed accessor per
//! filterable field. Both are generated from the same rows so they cannot
//! drift apart.

use armonik_api_rs::fields::FieldDescriptor;
use armonik_api_rs::models::{ResultStatus, SessionStatus, TaskStatus};

use crate::field::{Entity, FieldRef, FieldType};
use crate::handles::{
    ArrayField, BooleanField, DateField, DurationField, NumberField, StatusField, StringField,
};
use crate::registry::{Composite, FieldRegistry, FieldSpec};

macro_rules! field_type {
    (String) => { FieldType::String };
    (Number) => { FieldType::Number };
    (Date) => { FieldType::Date };
    (Duration) => { FieldType::Duration };
    (Status) => { FieldType::Status };
    (Boolean) => { FieldType::Boolean };
    (Array) => { FieldType::Array };
}

macro_rules! handle_type {
    (String) => { StringField };
    (Number) => { NumberField };
    (Date) => { DateField };
    (Duration) => { DurationField };
    (Status < $status:ty >) => { StatusField<$status> };
    (Boolean) => { BooleanField };
    (Array) => { ArrayField };
}

macro_rules! fields {
    (
        @build $receiver:tt
        $(#[$meta:meta])*
        $handle:ident for $entity:expr, prefix $prefix:literal, table $table:ident {
            $( $name:ident : $kind:ident $(<$status:ty>)? = $ctor:ident($wire:literal), )*
        }
        not_filterable { $($hidden:ident),* $(,)? }
    ) => {
        pub(crate) static $table: &[FieldSpec] = &[
            $( FieldSpec::filterable(stringify!($name), field_type!($kind), FieldDescriptor::$ctor($wire)), )*
            $( FieldSpec::not_filterable(stringify!($hidden)), )*
        ];

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $handle;

        impl $handle {
            $(
                pub fn $name $receiver -> handle_type!($kind $(<$status>)?) {
                    <handle_type!($kind $(<$status>)?)>::new(FieldRef::new(
                        $entity,
                        concat!($prefix, stringify!($name)),
                        FieldDescriptor::$ctor($wire),
                        field_type!($kind),
                    ))
                }
            )*
        }
    };
    // Composite groups are reached through a value, e.g. `Task::options().priority()`.
    (composite $($rest:tt)*) => {
        fields! { @build (self) $($rest)* }
    };
    ($(#[$meta:meta])* $handle:ident for $($rest:tt)*) => {
        fields! { @build () $(#[$meta])* $handle for $($rest)* }
    };
}

fn option_generic(key: String) -> FieldDescriptor {
    FieldDescriptor::task_option_generic(key)
}

// ==================== Task ====================

fields! {
    /// Task fields, e.g. `Task::status().eq(TaskStatus::Completed)`.
    Task for Entity::Task, prefix "", table TASK_FIELDS {
        id: String = task_summary("TASK_SUMMARY_ENUM_FIELD_TASK_ID"),
        session_id: String = task_summary("TASK_SUMMARY_ENUM_FIELD_SESSION_ID"),
        owner_pod_id: String = task_summary("TASK_SUMMARY_ENUM_FIELD_OWNER_POD_ID"),
        initial_task_id: String = task_summary("TASK_SUMMARY_ENUM_FIELD_INITIAL_TASK_ID"),
        created_by: String = task_summary("TASK_SUMMARY_ENUM_FIELD_CREATED_BY"),
        status: Status<TaskStatus> = task_summary("TASK_SUMMARY_ENUM_FIELD_STATUS"),
        created_at: Date = task_summary("TASK_SUMMARY_ENUM_FIELD_CREATED_AT"),
        submitted_at: Date = task_summary("TASK_SUMMARY_ENUM_FIELD_SUBMITTED_AT"),
        received_at: Date = task_summary("TASK_SUMMARY_ENUM_FIELD_RECEIVED_AT"),
        acquired_at: Date = task_summary("TASK_SUMMARY_ENUM_FIELD_ACQUIRED_AT"),
        fetched_at: Date = task_summary("TASK_SUMMARY_ENUM_FIELD_FETCHED_AT"),
        started_at: Date = task_summary("TASK_SUMMARY_ENUM_FIELD_STARTED_AT"),
        processed_at: Date = task_summary("TASK_SUMMARY_ENUM_FIELD_PROCESSED_AT"),
        ended_at: Date = task_summary("TASK_SUMMARY_ENUM_FIELD_ENDED_AT"),
        pod_ttl: Date = task_summary("TASK_SUMMARY_ENUM_FIELD_POD_TTL"),
        creation_to_end_duration: Duration = task_summary("TASK_SUMMARY_ENUM_FIELD_CREATION_TO_END_DURATION"),
        processing_to_end_duration: Duration = task_summary("TASK_SUMMARY_ENUM_FIELD_PROCESSING_TO_END_DURATION"),
        received_to_end_duration: Duration = task_summary("TASK_SUMMARY_ENUM_FIELD_RECEIVED_TO_END_DURATION"),
        pod_hostname: String = task_summary("TASK_SUMMARY_ENUM_FIELD_POD_HOSTNAME"),
        payload_id: String = task_summary("TASK_SUMMARY_ENUM_FIELD_PAYLOAD_ID"),
    }
    not_filterable {
        parent_task_ids,
        data_dependencies,
        expected_output_ids,
        retry_of_ids,
        status_message,
        options,
        output,
    }
}

fields! {
    composite
    /// Well-known task options. Other keys are reached with
    /// [`TaskOptions::get`].
    TaskOptions for Entity::Task, prefix "options.", table TASK_OPTION_FIELDS {
        max_duration: Duration = task_option("TASK_OPTION_ENUM_FIELD_MAX_DURATION"),
        max_retries: Number = task_option("TASK_OPTION_ENUM_FIELD_MAX_RETRIES"),
        priority: Number = task_option("TASK_OPTION_ENUM_FIELD_PRIORITY"),
        partition_id: String = task_option("TASK_OPTION_ENUM_FIELD_PARTITION_ID"),
        application_name: String = task_option("TASK_OPTION_ENUM_FIELD_APPLICATION_NAME"),
        application_namespace: String = task_option("TASK_OPTION_ENUM_FIELD_APPLICATION_NAMESPACE"),
        application_version: String = task_option("TASK_OPTION_ENUM_FIELD_APPLICATION_VERSION"),
        application_service: String = task_option("TASK_OPTION_ENUM_FIELD_APPLICATION_SERVICE"),
        engine_type: String = task_option("TASK_OPTION_ENUM_FIELD_ENGINE_TYPE"),
    }
    not_filterable {}
}

fields! {
    composite
    /// Task output fields.
    TaskOutput for Entity::Task, prefix "output.", table TASK_OUTPUT_FIELDS {
        error: String = task_summary("TASK_SUMMARY_ENUM_FIELD_ERROR"),
    }
    not_filterable {}
}

impl Task {
    pub fn options() -> TaskOptions {
        TaskOptions
    }

    pub fn output() -> TaskOutput {
        TaskOutput
    }
}

impl TaskOptions {
    /// A user-defined option, compared as a string.
    pub fn get(self, key: impl Into<String>) -> StringField {
        generic_option(Entity::Task, key.into())
    }
}

fn generic_option(entity: Entity, key: String) -> StringField {
    StringField::new(FieldRef::new(
        entity,
        format!("options.{key}"),
        option_generic(key),
        FieldType::String,
    ))
}

pub(crate) static TASK_REGISTRY: FieldRegistry = FieldRegistry::new(
    Entity::Task,
    TASK_FIELDS,
    &[
        Composite {
            prefix: "options",
            fields: TASK_OPTION_FIELDS,
            generic: Some(option_generic),
        },
        Composite {
            prefix: "output",
            fields: TASK_OUTPUT_FIELDS,
            generic: None,
        },
    ],
);

// ==================== Session ====================

fields! {
    /// Session fields.
    Session for Entity::Session, prefix "", table SESSION_FIELDS {
        session_id: String = session_raw("SESSION_RAW_ENUM_FIELD_SESSION_ID"),
        status: Status<SessionStatus> = session_raw("SESSION_RAW_ENUM_FIELD_STATUS"),
        client_submission: Boolean = session_raw("SESSION_RAW_ENUM_FIELD_CLIENT_SUBMISSION"),
        worker_submission: Boolean = session_raw("SESSION_RAW_ENUM_FIELD_WORKER_SUBMISSION"),
        partition_ids: Array = session_raw("SESSION_RAW_ENUM_FIELD_PARTITION_IDS"),
        created_at: Date = session_raw("SESSION_RAW_ENUM_FIELD_CREATED_AT"),
        cancelled_at: Date = session_raw("SESSION_RAW_ENUM_FIELD_CANCELLED_AT"),
        closed_at: Date = session_raw("SESSION_RAW_ENUM_FIELD_CLOSED_AT"),
        purged_at: Date = session_raw("SESSION_RAW_ENUM_FIELD_PURGED_AT"),
        deleted_at: Date = session_raw("SESSION_RAW_ENUM_FIELD_DELETED_AT"),
        duration: Duration = session_raw("SESSION_RAW_ENUM_FIELD_DURATION"),
    }
    not_filterable { options }
}

fields! {
    composite
    /// Default task options of a session.
    SessionOptions for Entity::Session, prefix "options.", table SESSION_OPTION_FIELDS {
        max_duration: Duration = task_option("TASK_OPTION_ENUM_FIELD_MAX_DURATION"),
        max_retries: Number = task_option("TASK_OPTION_ENUM_FIELD_MAX_RETRIES"),
        priority: Number = task_option("TASK_OPTION_ENUM_FIELD_PRIORITY"),
        partition_id: String = task_option("TASK_OPTION_ENUM_FIELD_PARTITION_ID"),
        application_name: String = task_option("TASK_OPTION_ENUM_FIELD_APPLICATION_NAME"),
        application_namespace: String = task_option("TASK_OPTION_ENUM_FIELD_APPLICATION_NAMESPACE"),
        application_version: String = task_option("TASK_OPTION_ENUM_FIELD_APPLICATION_VERSION"),
        application_service: String = task_option("TASK_OPTION_ENUM_FIELD_APPLICATION_SERVICE"),
        engine_type: String = task_option("TASK_OPTION_ENUM_FIELD_ENGINE_TYPE"),
    }
    not_filterable {}
}

impl Session {
    pub fn options() -> SessionOptions {
        SessionOptions
    }
}

impl SessionOptions {
    /// A user-defined option, compared as a string.
    pub fn get(self, key: impl Into<String>) -> StringField {
        generic_option(Entity::Session, key.into())
    }
}

pub(crate) static SESSION_REGISTRY: FieldRegistry = FieldRegistry::new(
    Entity::Session,
    SESSION_FIELDS,
    &[Composite {
        prefix: "options",
        fields: SESSION_OPTION_FIELDS,
        generic: Some(option_generic),
    }],
);

// ==================== Result ====================

fields! {
    /// Result (data object) fields.
    Result for Entity::Result, prefix "", table RESULT_FIELDS {
        session_id: String = result_raw("RESULT_RAW_ENUM_FIELD_SESSION_ID"),
        name: String = result_raw("RESULT_RAW_ENUM_FIELD_NAME"),
        result_id: String = result_raw("RESULT_RAW_ENUM_FIELD_RESULT_ID"),
        created_by: String = result_raw("RESULT_RAW_ENUM_FIELD_CREATED_BY"),
        owner_task_id: String = result_raw("RESULT_RAW_ENUM_FIELD_OWNER_TASK_ID"),
        status: Status<ResultStatus> = result_raw("RESULT_RAW_ENUM_FIELD_STATUS"),
        created_at: Date = result_raw("RESULT_RAW_ENUM_FIELD_CREATED_AT"),
        completed_at: Date = result_raw("RESULT_RAW_ENUM_FIELD_COMPLETED_AT"),
        size: Number = result_raw("RESULT_RAW_ENUM_FIELD_SIZE"),
    }
    not_filterable {}
}

pub(crate) static RESULT_REGISTRY: FieldRegistry =
    FieldRegistry::new(Entity::Result, RESULT_FIELDS, &[]);

// ==================== Partition ====================

fields! {
    /// Partition fields.
    Partition for Entity::Partition, prefix "", table PARTITION_FIELDS {
        id: String = partition_raw("PARTITION_RAW_ENUM_FIELD_ID"),
        priority: Number = partition_raw("PARTITION_RAW_ENUM_FIELD_PRIORITY"),
        preemption_percentage: Number = partition_raw("PARTITION_RAW_ENUM_FIELD_PREEMPTION_PERCENTAGE"),
        pod_reserved: Number = partition_raw("PARTITION_RAW_ENUM_FIELD_POD_RESERVED"),
        pod_max: Number = partition_raw("PARTITION_RAW_ENUM_FIELD_POD_MAX"),
        parent_partition_ids: Array = partition_raw("PARTITION_RAW_ENUM_FIELD_PARENT_PARTITION_IDS"),
    }
    not_filterable { pod_configuration }
}

pub(crate) static PARTITION_REGISTRY: FieldRegistry =
    FieldRegistry::new(Entity::Partition, PARTITION_FIELDS, &[]);

// ==================== Application ====================

fields! {
    /// Application fields.
    Application for Entity::Application, prefix "", table APPLICATION_FIELDS {
        name: String = application("APPLICATION_RAW_ENUM_FIELD_NAME"),
        namespace: String = application("APPLICATION_RAW_ENUM_FIELD_NAMESPACE"),
        service: String = application("APPLICATION_RAW_ENUM_FIELD_SERVICE"),
        version: String = application("APPLICATION_RAW_ENUM_FIELD_VERSION"),
    }
    not_filterable {}
}

pub(crate) static APPLICATION_REGISTRY: FieldRegistry =
    FieldRegistry::new(Entity::Application, APPLICATION_FIELDS, &[]);
