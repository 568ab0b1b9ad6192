//! Building list requests from filters.

use armonik_api_rs::config::ClientConfig;
use armonik_api_rs::filters::Filters;
use armonik_api_rs::request::{ListRequest, Sort, SortDirection, DEFAULT_PAGE_SIZE};
use tracing::debug;

use crate::error::{FilterError, FilterResult};
use crate::expr::Filter;
use crate::field::{Entity, FieldRef};

/// Builder for a [`ListRequest`] over one entity kind.
///
/// The filter and the sort field must belong to the builder's entity. An
/// empty (or absent) filter produces a request that matches everything.
///
/// # Example
///
/// ```
/// use armonik_filter_rs::{Entity, ListRequestBuilder, Task};
/// use armonik_api_rs::models::TaskStatus;
/// use armonik_api_rs::request::SortDirection;
///
/// let request = ListRequestBuilder::new(Entity::Task)
///     .filter(Task::status().eq(TaskStatus::Error))
///     .sort(Task::created_at(), SortDirection::Desc)
///     .page_size(20)
///     .build()
///     .unwrap();
/// assert_eq!(request.filters.or.len(), 1);
/// assert_eq!(request.page_size, 20);
/// ```
#[derive(Debug, Clone)]
pub struct ListRequestBuilder {
    entity: Entity,
    filter: Option<Filter>,
    sort: Option<(FieldRef, SortDirection)>,
    page: u32,
    page_size: u32,
}

impl ListRequestBuilder {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            filter: None,
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Starts a builder using the configured page size.
    pub fn with_config(entity: Entity, config: &ClientConfig) -> Self {
        Self::new(entity).page_size(config.page_size)
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, field: impl Into<FieldRef>, direction: SortDirection) -> Self {
        self.sort = Some((field.into(), direction));
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Compiles the filter and assembles the request.
    ///
    /// # Errors
    ///
    /// [`FilterError::IncompatibleFilterTypes`] if the filter or the sort
    /// field belongs to another entity kind.
    pub fn build(self) -> FilterResult<ListRequest> {
        let filters = match &self.filter {
            Some(filter) if filter.entity() != self.entity => {
                return Err(FilterError::IncompatibleFilterTypes {
                    left: self.entity,
                    right: filter.entity(),
                })
            }
            Some(filter) if !filter.is_empty() => filter.to_message()?,
            _ => Filters::default(),
        };

        let sort = match self.sort {
            Some((field, _)) if field.entity() != self.entity => {
                return Err(FilterError::IncompatibleFilterTypes {
                    left: self.entity,
                    right: field.entity(),
                })
            }
            Some((field, direction)) => Some(Sort {
                field: field.descriptor().clone(),
                direction,
            }),
            None => None,
        };

        debug!(
            entity = %self.entity,
            page = self.page,
            page_size = self.page_size,
            conjunctions = filters.or.len(),
            sorted = sort.is_some(),
            "built list request"
        );
        Ok(ListRequest {
            page: self.page,
            page_size: self.page_size,
            filters,
            sort,
        })
    }
}
