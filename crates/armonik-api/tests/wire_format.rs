//! JSON shape of the wire messages and config file handling, exercised
//! through the public API only.

use std::fs;

use armonik_api_rs::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn status_leaf(status: SessionStatus) -> FilterField {
    FilterField {
        field: FieldDescriptor::session_raw("SESSION_RAW_ENUM_FIELD_STATUS"),
        payload: FilterPayload::Status(FilterStatus {
            value: status.into(),
            operator: FilterStatusOperator::NotEqual,
        }),
    }
}

// ==================== Filters ====================

#[test]
fn test_filters_json_shape() {
    let filters = Filters {
        or: vec![FiltersAnd {
            and: vec![
                status_leaf(SessionStatus::Cancelled),
                FilterField {
                    field: FieldDescriptor::session_raw("SESSION_RAW_ENUM_FIELD_CLIENT_SUBMISSION"),
                    payload: FilterPayload::Boolean(FilterBoolean {
                        value: true,
                        operator: FilterBooleanOperator::Is,
                    }),
                },
            ],
        }],
    };

    assert_eq!(
        serde_json::to_value(&filters).unwrap(),
        json!({
            "or": [{
                "and": [
                    {
                        "field": {"session_raw_field": {"field": "SESSION_RAW_ENUM_FIELD_STATUS"}},
                        "filter_status": {
                            "value": "SESSION_STATUS_CANCELLED",
                            "operator": "FILTER_STATUS_OPERATOR_NOT_EQUAL"
                        }
                    },
                    {
                        "field": {"session_raw_field": {"field": "SESSION_RAW_ENUM_FIELD_CLIENT_SUBMISSION"}},
                        "filter_boolean": {
                            "value": true,
                            "operator": "FILTER_BOOLEAN_OPERATOR_IS"
                        }
                    }
                ]
            }]
        })
    );
}

#[test]
fn test_filters_parse_from_service_json() {
    let raw = json!({
        "or": [{
            "and": [{
                "field": {"session_raw_field": {"field": "SESSION_RAW_ENUM_FIELD_STATUS"}},
                "filter_status": {
                    "value": "SESSION_STATUS_PAUSED",
                    "operator": "FILTER_STATUS_OPERATOR_NOT_EQUAL"
                }
            }]
        }]
    });
    let filters: Filters = serde_json::from_value(raw).unwrap();
    assert_eq!(filters.or[0].and[0], status_leaf(SessionStatus::Paused));
}

#[test]
fn test_empty_filters_default() {
    let filters: Filters = serde_json::from_value(json!({})).unwrap();
    assert!(filters.or.is_empty());
}

// ==================== List Requests ====================

#[test]
fn test_list_request_json() {
    let request = ListRequest {
        page: 1,
        page_size: 20,
        filters: Filters::default(),
        sort: Some(Sort {
            field: FieldDescriptor::task_summary("TASK_SUMMARY_ENUM_FIELD_CREATED_AT"),
            direction: SortDirection::Desc,
        }),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["page"], 1);
    assert_eq!(value["page_size"], 20);
    assert_eq!(
        value["sort"]["field"]["task_summary_field"]["field"],
        "TASK_SUMMARY_ENUM_FIELD_CREATED_AT"
    );
}

// ==================== Time Encodings ====================

#[test]
fn test_timestamp_and_duration_json() {
    let ts = Timestamp::new(10, 1_500_000_000);
    assert_eq!(serde_json::to_value(ts).unwrap(), json!({"seconds": 11, "nanos": 500_000_000}));

    let span = Duration::new(-2, 250_000_000);
    assert_eq!(
        serde_json::to_value(span).unwrap(),
        json!({"seconds": -1, "nanos": -750_000_000})
    );
}

// ==================== Config Files ====================

#[test]
fn test_config_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("akq").join("config.toml");
    let config = ClientConfig {
        endpoint: Some("https://armonik.local:5001".into()),
        page_size: 250,
        ..ClientConfig::default()
    };
    config.save(&path).unwrap();

    let loaded = ClientConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.is_secure());
    assert!(!loaded.has_client_identity());
}

#[test]
fn test_config_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "page_size = \"many\"\n").unwrap();

    let error = ClientConfig::load(&path).unwrap_err();
    assert!(matches!(error, ConfigError::Parse { .. }));
    assert!(error.to_string().contains("config.toml"));
}
