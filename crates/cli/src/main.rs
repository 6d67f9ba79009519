//! CoffeeHub CLI - Interactive storefront shell and user management.
//!
//! # Usage
//!
//! ```bash
//! # Drive the widget interactively
//! coffeehub shell
//!
//! # List signed-up users
//! coffeehub users list
//!
//! # Clear the current session only
//! coffeehub logout
//! ```
//!
//! Storage location and animation timings come from `COFFEEHUB_*`
//! environment variables (see `coffeehub_storefront::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coffeehub_storefront::config::{LogFormat, WidgetConfig};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "coffeehub")]
#[command(author, version, about = "CoffeeHub storefront widget tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive storefront session
    Shell,
    /// Manage signed-up users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Clear the logged-in user
    Logout,
}

#[derive(Subcommand)]
enum UsersAction {
    /// List signed-up users
    List,
}

/// Install the tracing subscriber, logging to stderr.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coffeehub_storefront=info,coffeehub_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match WidgetConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Pretty);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &WidgetConfig) -> Result<(), CliError> {
    match cli.command {
        Commands::Shell => commands::shell::run(config).await?,
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list(config)?,
        },
        Commands::Logout => commands::users::logout(config)?,
    }
    Ok(())
}
