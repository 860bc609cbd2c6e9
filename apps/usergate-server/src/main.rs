use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use usergate_server::{AppConfig, CliOverrides, Servers};

/// Usergate Server - public gateway in front of the users service
#[derive(Parser)]
#[command(name = "usergate-server")]
#[command(about = "Usergate Server - public gateway in front of the users service")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address override for the users service
    #[arg(long, value_name = "ADDR")]
    users_listen: Option<String>,

    /// Listen address override for the gateway
    #[arg(long, value_name = "ADDR")]
    gateway_listen: Option<String>,

    /// Users service URI the gateway connects to
    #[arg(long, value_name = "URI")]
    users_endpoint: Option<String>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start both services
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        users_listen: cli.users_listen,
        gateway_listen: cli.gateway_listen,
        users_endpoint: cli.users_endpoint,
    });

    bootstrap::init_logging(&config.logging, cli.verbose)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    // Dispatch subcommands (default: run)
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    tracing::info!("Usergate Server starting");

    let cancel = CancellationToken::new();
    let signal_watcher = bootstrap::cancel_on_signal(cancel.clone());

    let servers = Servers::bind(config).await?;
    let result = servers.serve(cancel.clone()).await;

    cancel.cancel();
    signal_watcher.await?;

    tracing::info!("Usergate Server stopped");
    result
}
