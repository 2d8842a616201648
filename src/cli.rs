//! Command-line interface definition for nbquery
//!
//! This module defines the CLI structure using clap's derive API. The
//! connection settings (`--url`, `--api-key`, `--notebook`) fall back to
//! environment variables and then to built-in defaults, so the precedence
//! is always: explicit flag > environment variable > default.

use clap::Parser;

/// Default API base URL when neither `--url` nor `DBNOTEBOOK_API_URL` is set
pub const DEFAULT_BASE_URL: &str = "http://localhost:7860";

/// Default API key (the server's bootstrap admin key)
pub const DEFAULT_API_KEY: &str = "dbn_00000000000000000000000000000001";

/// Default notebook UUID used by the demo when none is configured
pub const DEFAULT_NOTEBOOK_ID: &str = "18ee0c23-a2ce-4eb2-a56c-62a12dee964a";

/// nbquery - DBNotebook Query API client
///
/// List notebooks, run stateless queries, and run multi-turn conversational
/// queries against a DBNotebook server. Retrieval tuning (top-k, reranking,
/// RAPTOR hierarchical summaries) is passed through to the server; anything
/// left unset on the command line is omitted from the request so the
/// server's own defaults apply.
#[derive(Parser, Debug, Clone)]
#[command(name = "nbquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// LLM model to use (e.g., gpt-4.1-mini, llama3.1:latest)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Notebook UUID to query
    #[arg(short, long, env = "DBNOTEBOOK_NOTEBOOK_ID", default_value = DEFAULT_NOTEBOOK_ID)]
    pub notebook: String,

    /// Custom query to run (single stateless query)
    #[arg(short, long)]
    pub query: Option<String>,

    /// API base URL
    #[arg(long, env = "DBNOTEBOOK_API_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// API key for authentication
    #[arg(short = 'k', long, env = "DBNOTEBOOK_API_KEY", default_value = DEFAULT_API_KEY)]
    pub api_key: String,

    /// List available models and exit
    #[arg(long)]
    pub list_models: bool,

    /// List available notebooks and exit
    #[arg(long)]
    pub list_notebooks: bool,

    /// Skip demo queries (use with --query for a single query)
    #[arg(long)]
    pub no_demo: bool,

    /// Number of chunks to retrieve (server default: 6)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub top_k: Option<u32>,

    /// Max sources to return in the response
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub max_sources: u32,

    /// Disable reranking (faster but may be less accurate)
    #[arg(long)]
    pub no_reranker: bool,

    /// Include RAPTOR hierarchical summaries for broader context
    #[arg(long)]
    pub include_raptor: bool,

    /// Max history messages for conversational queries
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub max_history: u32,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
