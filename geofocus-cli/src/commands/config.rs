//! Configuration management CLI commands.

use std::path::Path;

use clap::Subcommand;
use geofocus::config::{config_file_path, ConfigFile};

use super::common::load_config;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);

    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = load_config(Some(&path))?;
            print!("{}", show(&config, &path));
            Ok(())
        }
        ConfigCommands::Init { force } => {
            if init(&path, force)? {
                println!("Configuration file: {}", path.display());
                println!();
                println!("Edit this file to customize GeoFocus settings.");
                println!("CLI arguments override config file values when specified.");
            } else {
                println!("Configuration file already exists: {}", path.display());
                println!("Use --force to overwrite it with defaults.");
            }
            Ok(())
        }
    }
}

/// Writes defaults to `path`. Returns `false` if a file was kept.
fn init(path: &Path, force: bool) -> Result<bool, CliError> {
    if force {
        ConfigFile::default().save_to(path)?;
        return Ok(true);
    }
    Ok(ConfigFile::ensure_exists_at(path)?)
}

fn show(config: &ConfigFile, path: &Path) -> String {
    let exists = if path.exists() { "" } else { " (not found, using defaults)" };
    let mut out = format!("Configuration: {}{}\n\n", path.display(), exists);

    out.push_str("[sources]\n");
    for source in config.geo_sources() {
        out.push_str(&format!("  {}\n", source));
    }
    out.push_str(&format!(
        "\n[cache]\n  ttl_secs = {}\n  stale_policy = {}\n",
        config.cache.ttl_secs, config.cache.stale_policy
    ));
    out.push_str(&format!(
        "\n[download]\n  timeout = {}\n",
        config.download.timeout
    ));
    out.push_str(&format!("\n[server]\n  bind = {}\n", config.server.bind));
    out.push_str(&format!(
        "\n[focus]\n  altitude = {}\n  duration_ms = {}\n  max_points = {}\n",
        config.focus.altitude, config.focus.duration_ms, config.focus.max_points
    ));
    out.push_str(&format!(
        "  auto_rotate = {}\n  auto_rotate_speed = {}\n  enable_zoom = {}\n",
        config.focus.auto_rotate, config.focus.auto_rotate_speed, config.focus.enable_zoom
    ));
    out.push_str(&format!(
        "\n[logging]\n  file = {}\n",
        config.logging.file.display()
    ));
    out
}
