//! Config command implementation.
//!
//! View and initialize the connection settings.
//! Config file is located at ~/.config/akq/config.toml unless `AKQ_CONFIG`
//! points elsewhere.

use std::fs;
use std::path::Path;

use armonik_api_rs::config::{config_path, ClientConfig, DEFAULT_CONFIG};
use armonik_api_rs::error::ConfigError;
use owo_colors::OwoColorize;

use super::{CommandContext, CommandError, Result};

/// Executes the config show command.
///
/// Shows the resolved settings, environment overrides included.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = config_path()?;
    let config = ClientConfig::resolve()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        print!("{}", format_show(&path, &config, ctx.use_colors));
    }

    Ok(())
}

fn format_show(path: &Path, config: &ClientConfig, use_colors: bool) -> String {
    let mut output = String::new();

    let header = "Configuration";
    if use_colors {
        output.push_str(&format!("{}\n\n", header.green().bold()));
    } else {
        output.push_str(&format!("{header}\n\n"));
    }

    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Exists: {}\n\n", path.exists()));

    let unset = || "(not set)".to_string();
    let show_path = |p: &Option<std::path::PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(unset)
    };

    output.push_str("Settings:\n");
    output.push_str(&format!(
        "  endpoint: {}\n",
        config.endpoint.clone().unwrap_or_else(unset)
    ));
    output.push_str(&format!("  ca_cert: {}\n", show_path(&config.ca_cert)));
    output.push_str(&format!("  client_cert: {}\n", show_path(&config.client_cert)));
    output.push_str(&format!("  client_key: {}\n", show_path(&config.client_key)));
    output.push_str(&format!(
        "  allow_unsafe_connection: {}\n",
        config.allow_unsafe_connection
    ));
    output.push_str(&format!("  page_size: {}\n", config.page_size));

    if config.allow_unsafe_connection {
        let warning = "Warning: server certificates are not verified";
        if use_colors {
            output.push_str(&format!("\n{}\n", warning.yellow()));
        } else {
            output.push_str(&format!("\n{warning}\n"));
        }
    }

    output
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
///
/// # Errors
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = config_path()?;
    write_default(&path, force)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "created",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created default config at: {}", path.display());
    }

    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CommandError::Refused(format!(
            "config file already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
