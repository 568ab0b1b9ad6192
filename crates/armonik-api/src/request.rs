//! List request envelope.
//!
//! All list endpoints (tasks, sessions, results, partitions, applications)
//! take the same shape: a page window, a compiled [`Filters`] predicate and an
//! optional sort key. Pagination and ordering are applied by the server.

use serde::{Deserialize, Serialize};

use crate::fields::FieldDescriptor;
use crate::filters::Filters;

/// Default number of items per page when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Sort direction of a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "SORT_DIRECTION_ASC")]
    Asc,
    #[serde(rename = "SORT_DIRECTION_DESC")]
    Desc,
}

/// Sort key of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Field to order by.
    pub field: FieldDescriptor,
    /// Ascending or descending.
    pub direction: SortDirection,
}

/// A paginated, filtered list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Predicate in disjunctive normal form. An empty `or` matches everything.
    pub filters: Filters,
    /// Optional ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            filters: Filters::default(),
            sort: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_matches_everything() {
        let request = ListRequest::default();
        assert_eq!(request.page, 0);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        assert!(request.filters.or.is_empty());

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("sort").is_none());
    }

    #[test]
    fn test_sort_serializes_direction_name() {
        let request = ListRequest {
            sort: Some(Sort {
                field: FieldDescriptor::session_raw("SESSION_RAW_ENUM_FIELD_CREATED_AT"),
                direction: SortDirection::Desc,
            }),
            ..ListRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["sort"]["direction"], "SORT_DIRECTION_DESC");
        assert_eq!(
            json["sort"]["field"]["session_raw_field"]["field"],
            "SESSION_RAW_ENUM_FIELD_CREATED_AT"
        );
    }
}
