//! Command dispatch: maps parsed CLI arguments to command handlers.

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::compile::CompileOptions;
use crate::commands::request::RequestOptions;
use crate::commands::{self, CommandContext, Result};

/// Runs the command selected on the command line.
pub fn execute(cli: &Cli, ctx: &CommandContext) -> Result<()> {
    match &cli.command {
        Commands::Compile {
            entity,
            expression,
            pretty,
        } => commands::compile::execute(
            ctx,
            &CompileOptions {
                entity: *entity,
                expression: expression.clone(),
                pretty: *pretty,
            },
        ),
        Commands::Fields { entity } => commands::fields::execute(ctx, *entity),
        Commands::Request {
            entity,
            filter,
            sort,
            desc,
            page,
            page_size,
        } => commands::request::execute(
            ctx,
            &RequestOptions {
                filter: filter.clone(),
                sort: sort.clone(),
                desc: *desc,
                page: *page,
                page_size: *page_size,
                ..RequestOptions::new(*entity)
            },
        ),
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
            Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
        },
        Commands::Completions { shell } => Ok(commands::completions::execute(*shell)?),
    }
}
