//! nbquery - DBNotebook Query API client CLI
//!
//! Main entry point: initializes tracing, parses the CLI, resolves the
//! effective configuration once, and dispatches to the command handlers.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nbquery::cli::Cli;
use nbquery::commands::{self, RunOptions};
use nbquery::config::Config;
use nbquery::{output, QueryClient};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse_args();

    // List-only mode that needs no configuration or network access
    if cli.list_models {
        output::print_models();
        return Ok(());
    }

    // Resolve configuration once; read-only from here on
    let config = Config::from_cli(&cli);
    config.validate()?;

    let client = QueryClient::new(&config)?;

    if cli.list_notebooks {
        commands::notebooks::list_notebooks(&client).await?;
        return Ok(());
    }

    let options = RunOptions::from_cli(&cli);
    commands::run::run(&config, &client, &options).await
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nbquery=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
