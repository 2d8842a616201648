//! Top-level run flow
//!
//! Everything that happens after the list-and-exit modes: the startup
//! banner, the connection-verifying notebook listing, the notebook
//! resolution policy, an optional ad-hoc query, and the fixed demo
//! sequence (one stateless query, then a three-turn conversation).
//!
//! Individual query failures are reported inline and never produce a
//! non-zero exit; only a failed notebook listing aborts the run.

use crate::cli::Cli;
use crate::commands::{notebooks, query, QueryOptions};
use crate::config::Config;
use crate::api::QueryClient;
use crate::error::Result;
use crate::output;

/// The stateless query issued by the demo sequence
const DEMO_STATELESS_QUERY: &str = "What are the key policies mentioned in the documents?";

/// The three-turn demo conversation
const DEMO_CONVERSATION: [&str; 3] = [
    "What is the work from home policy?",
    "What are the eligibility requirements for it?",
    "Are there any exceptions to this policy?",
];

/// Options controlling the run flow
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Ad-hoc query to run before (or instead of) the demo
    pub query: Option<String>,
    /// Skip the demo sequence
    pub no_demo: bool,
    /// History cap for conversational turns
    pub max_history: u32,
    /// Retrieval tuning shared by the stateless queries
    pub query_options: QueryOptions,
}

impl RunOptions {
    /// Derive run options from parsed CLI flags
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            query: cli.query.clone(),
            no_demo: cli.no_demo,
            max_history: cli.max_history,
            query_options: QueryOptions::from_cli(cli),
        }
    }
}

/// Execute the full run flow
///
/// # Errors
///
/// Returns an error only when the notebook listing itself fails; query
/// failures are reported inline and the run proceeds to its next step.
pub async fn run(config: &Config, client: &QueryClient, options: &RunOptions) -> Result<()> {
    println!("{}", output::rule());
    println!("DBNotebook Query API");
    println!("{}", output::rule());
    println!("API URL: {}", client.base_url());
    println!("Notebook ID: {}", config.notebook_id);
    if let Some(model) = &options.query_options.model {
        println!("Model: {}", model);
    }

    // Listing doubles as a connection check; a failure here aborts the run.
    let notebooks = notebooks::list_notebooks(client).await?;

    let notebook_id = match notebooks::resolve_notebook(&config.notebook_id, &notebooks) {
        Some(id) => id,
        None => {
            // Informational termination, not an error exit.
            println!("\nNo notebooks found. Please create a notebook first.");
            return Ok(());
        }
    };

    if let Some(ad_hoc) = &options.query {
        query::query_stateless(client, &notebook_id, ad_hoc, &options.query_options).await;
        if options.no_demo {
            output::print_section("Query Complete!");
            return Ok(());
        }
    }

    if !options.no_demo {
        query::query_stateless(
            client,
            &notebook_id,
            DEMO_STATELESS_QUERY,
            &options.query_options,
        )
        .await;

        query::query_conversational(
            client,
            &notebook_id,
            &DEMO_CONVERSATION,
            options.query_options.model.as_deref(),
            options.max_history,
        )
        .await;
    }

    output::print_section("Example Complete!");
    Ok(())
}
