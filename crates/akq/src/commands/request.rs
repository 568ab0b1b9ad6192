//! Request command implementation.
//!
//! Builds the list request an entity query would send: compiled filter,
//! sort field and pagination.

use armonik_api_rs::config::ClientConfig;
use armonik_api_rs::request::{ListRequest, SortDirection};
use armonik_filter_rs::{Entity, FieldRegistry, FilterParser, ListRequestBuilder};

use super::{CommandContext, Result};

/// Options for the request command.
#[derive(Debug)]
pub struct RequestOptions {
    /// Entity to list.
    pub entity: Entity,
    /// Filter expression.
    pub filter: Option<String>,
    /// Field path to sort by.
    pub sort: Option<String>,
    /// Sort in descending order.
    pub desc: bool,
    /// Page number.
    pub page: u32,
    /// Page size override.
    pub page_size: Option<u32>,
}

impl RequestOptions {
    /// Options for an unfiltered, unsorted first page.
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            filter: None,
            sort: None,
            desc: false,
            page: 0,
            page_size: None,
        }
    }
}

/// Executes the request command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the filter does not
/// parse, or the sort field is unknown.
pub fn execute(ctx: &CommandContext, opts: &RequestOptions) -> Result<()> {
    let config = ClientConfig::resolve()?;
    let request = build(&config, opts)?;

    if ctx.json_output || !ctx.quiet {
        println!("{}", serde_json::to_string_pretty(&request)?);
    }
    Ok(())
}

/// Builds the request from the resolved config and command options.
fn build(config: &ClientConfig, opts: &RequestOptions) -> Result<ListRequest> {
    let entity = opts.entity;
    let mut builder = ListRequestBuilder::with_config(entity, config).page(opts.page);

    if let Some(page_size) = opts.page_size {
        builder = builder.page_size(page_size);
    }

    if let Some(expression) = &opts.filter {
        builder = builder.filter(FilterParser::parse(entity, expression)?);
    }

    if let Some(path) = &opts.sort {
        let field = FieldRegistry::of(entity).lookup(path)?;
        let direction = if opts.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        builder = builder.sort(field, direction);
    }

    Ok(builder.build()?)
}
