//! cmdbctl - command line access to the configuration-center v3 API

mod attr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmdb_client::{Client, ClientConfig};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "cmdbctl")]
#[command(about = "Configuration-center v3 API client")]
#[command(long_about = "Configuration-center v3 API client

Examples:
  cmdbctl attr create --data '{\"bk_obj_id\":\"host\",\"bk_property_id\":\"cpu\"}'
  cmdbctl attr search --field bk_obj_id=host
  cmdbctl attr update --id 42 --data '{\"bk_property_name\":\"CPU\"}'
  cmdbctl attr delete --id 42")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file (TOML, YAML or JSON)
    #[arg(short = 'c', long = "config", global = true, env = "CMDB_CONFIG")]
    config: Option<PathBuf>,

    /// Base address, overrides the config file
    #[arg(long, global = true)]
    address: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage object attributes
    #[command(about = "Create, update, delete and search object attributes")]
    Attr {
        #[command(subcommand)]
        command: attr::AttrCommands,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    let mut config = ClientConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(address) = cli.address {
        config.address = address;
    }
    debug!(address = %config.address, "Using CMDB address");

    let client = Client::from_config(&config)?;

    match cli.command {
        Commands::Attr { command } => attr::handle_command(command, &client).await,
    }
}
