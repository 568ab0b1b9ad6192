//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the akq CLI.

use armonik_filter_rs::Entity;
use clap::{Parser, Subcommand, ValueEnum};

/// akq - Build and inspect ArmoniK filter expressions
#[derive(Parser, Debug)]
#[command(name = "akq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Wrap output and errors in JSON objects
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a filter expression to its wire message
    #[command(alias = "c")]
    Compile {
        /// Entity the expression applies to (task, session, result, partition, application)
        entity: Entity,

        /// Filter expression (e.g., "status == ERROR & options.priority > 3")
        expression: String,

        /// Pretty-print the JSON message
        #[arg(short, long)]
        pretty: bool,
    },

    /// List the fields of an entity
    #[command(alias = "f")]
    Fields {
        /// Entity to describe
        entity: Entity,
    },

    /// Build a list request
    #[command(alias = "r")]
    Request {
        /// Entity to list
        entity: Entity,

        /// Filter expression
        #[arg(short, long)]
        filter: Option<String>,

        /// Field to sort by
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort in descending order
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Page number, starting at 0
        #[arg(long, default_value = "0")]
        page: u32,

        /// Page size (default: from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,

    /// Print config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["akq", "--verbose", "fields", "task"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["akq", "fields", "task", "--quiet", "--json"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["akq", "-v", "-q", "fields", "task"]).is_err());
    }

    #[test]
    fn test_compile() {
        let cli = Cli::parse_from(["akq", "compile", "tasks", "status == ERROR", "--pretty"]);
        if let Commands::Compile {
            entity,
            expression,
            pretty,
        } = cli.command
        {
            assert_eq!(entity, Entity::Task);
            assert_eq!(expression, "status == ERROR");
            assert!(pretty);
        } else {
            panic!("Expected Compile command");
        }
    }

    #[test]
    fn test_unknown_entity_rejected() {
        let result = Cli::try_parse_from(["akq", "fields", "pod"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_defaults() {
        let cli = Cli::parse_from(["akq", "request", "session"]);
        if let Commands::Request {
            entity,
            filter,
            sort,
            desc,
            page,
            page_size,
        } = cli.command
        {
            assert_eq!(entity, Entity::Session);
            assert!(filter.is_none());
            assert!(sort.is_none());
            assert!(!desc);
            assert_eq!(page, 0);
            assert!(page_size.is_none());
        } else {
            panic!("Expected Request command");
        }
    }

    #[test]
    fn test_request_desc_requires_sort() {
        assert!(Cli::try_parse_from(["akq", "request", "task", "--desc"]).is_err());
        assert!(
            Cli::try_parse_from(["akq", "request", "task", "--sort", "created_at", "--desc"])
                .is_ok()
        );
    }

    #[test]
    fn test_request_page_size_range() {
        assert!(Cli::try_parse_from(["akq", "request", "task", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["akq", "request", "task", "--page-size", "25"]).is_ok());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["akq", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: Some(ConfigCommands::Init { force: true })
            }
        ));
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["akq", "completions", "zsh"]);
        if let Commands::Completions { shell } = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
