//! GeoFocus CLI - Command-line interface
//!
//! Serves the country polygon collection over HTTP, resolves country
//! queries to a camera focus point, and manages the config file.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::locate::LocateArgs;
use commands::serve::ServeArgs;

#[derive(Parser)]
#[command(name = "geofocus")]
#[command(version = geofocus::VERSION)]
#[command(about = "Locate countries in public polygon datasets", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.geofocus/config.ini
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the country collection over HTTP
    Serve(ServeArgs),

    /// Resolve a country and print its focus point
    Locate(LocateArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run(args, config_path),
        Commands::Locate(args) => commands::locate::run(args, config_path),
        Commands::Config { command } => commands::config::run(command, config_path),
    };

    if let Err(e) = result {
        e.exit();
    }
}
