//! Fields command implementation.
//!
//! Lists the filterable (and hidden) fields of an entity.

use armonik_filter_rs::{Entity, FieldRegistry};

use super::{CommandContext, Result};
use crate::output::{format_fields_json, format_fields_table};

/// Executes the fields command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext, entity: Entity) -> Result<()> {
    let registry = FieldRegistry::of(entity);
    let entries = registry.entries();

    if ctx.json_output {
        println!("{}", format_fields_json(registry, &entries)?);
    } else if !ctx.quiet {
        print!("{}", format_fields_table(registry, &entries, ctx.use_colors));
    }

    Ok(())
}
