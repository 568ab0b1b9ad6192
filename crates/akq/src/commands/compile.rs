//! Compile command implementation.
//!
//! Parses a filter expression for one entity and prints the wire message.

use armonik_filter_rs::{Entity, FilterParser};
use tracing::debug;

use super::{CommandContext, Result};
use crate::output::{format_compiled_json, format_message};

/// Options for the compile command.
#[derive(Debug)]
pub struct CompileOptions {
    /// Entity the expression applies to.
    pub entity: Entity,
    /// Filter expression.
    pub expression: String,
    /// Pretty-print the message.
    pub pretty: bool,
}

/// Executes the compile command.
///
/// # Errors
///
/// Returns an error if the expression does not parse or cannot be compiled.
pub fn execute(ctx: &CommandContext, opts: &CompileOptions) -> Result<()> {
    let output = render(ctx, opts)?;
    if ctx.json_output || !ctx.quiet {
        println!("{output}");
    }
    Ok(())
}

fn render(ctx: &CommandContext, opts: &CompileOptions) -> Result<String> {
    let filter = FilterParser::parse(opts.entity, &opts.expression)?;
    let message = filter.to_message()?;
    debug!(
        entity = %opts.entity,
        conjunctions = message.or.len(),
        "compiled expression"
    );

    if ctx.verbose {
        eprintln!("Normalized: {filter}");
    }

    if ctx.json_output {
        Ok(format_compiled_json(&opts.expression, &filter, &message)?)
    } else {
        Ok(format_message(&message, opts.pretty)?)
    }
}

#[cfg(test)]
mod tests {
    use armonik_filter_rs::ParseError;

    use super::*;
    use crate::commands::CommandError;

    fn ctx(json_output: bool) -> CommandContext {
        CommandContext {
            json_output,
            use_colors: false,
            quiet: false,
            verbose: false,
        }
    }

    fn opts(entity: Entity, expression: &str) -> CompileOptions {
        CompileOptions {
            entity,
            expression: expression.to_string(),
            pretty: false,
        }
    }

    #[test]
    fn test_render_message() {
        let output = render(&ctx(false), &opts(Entity::Result, "size > 10")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let leaf = &parsed["or"][0]["and"][0];
        assert_eq!(leaf["filter_number"]["value"], 10);
    }

    #[test]
    fn test_render_json_includes_normalized_form() {
        let output = render(
            &ctx(true),
            &opts(Entity::Task, "!(status == ERROR | status == TIMEOUT)"),
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["normalized"], "status != ERROR & status != TIMEOUT");
        assert_eq!(parsed["conjunctions"], 1);
    }

    #[test]
    fn test_render_parse_error() {
        let error = render(&ctx(false), &opts(Entity::Task, "")).unwrap_err();
        assert!(matches!(
            error,
            CommandError::Parse(ParseError::EmptyExpression)
        ));
    }
}
