//! Query executors
//!
//! Two execution styles over the same endpoint:
//!
//! - Stateless: one request, no session id, so the server must not apply
//!   or persist any conversation memory.
//! - Conversational: one fresh session UUID per invocation, shared across
//!   every turn, with turns issued strictly in order. Turn i+1 is not
//!   sent until turn i's response (success or failure) has arrived,
//!   because each turn depends on the server having committed the memory
//!   from the prior one. This sequencing is a correctness requirement,
//!   not an optimization opportunity.
//!
//! Request payloads are sparse: only fields the caller explicitly
//! supplied are serialized, so server defaults apply to the rest.
//! Failures are reported once, never retried; a failed conversational
//! turn does not abort the remaining turns.

use crate::api::{QueryClient, QueryRequest, QueryResponse};
use crate::cli::Cli;
use crate::error::NbqueryError;
use crate::output;

use uuid::Uuid;

/// Conversational turns always request at most this many sources, to keep
/// multi-turn output readable.
const CONVERSATIONAL_MAX_SOURCES: u32 = 2;

/// Tuning options for stateless queries
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// LLM model identifier, passed through verbatim when set
    pub model: Option<String>,
    /// Retrieval chunk count; omitted from the payload when unset
    pub top_k: Option<u32>,
    /// Max sources in the response
    pub max_sources: u32,
    /// Whether server-side reranking stays enabled (server default: true)
    pub reranker_enabled: bool,
    /// Whether RAPTOR summaries stay skipped (server default: true)
    pub skip_raptor: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            model: None,
            top_k: None,
            max_sources: 6,
            reranker_enabled: true,
            skip_raptor: true,
        }
    }
}

impl QueryOptions {
    /// Derive options from parsed CLI flags
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            model: cli.model.clone(),
            top_k: cli.top_k,
            max_sources: cli.max_sources,
            reranker_enabled: !cli.no_reranker,
            skip_raptor: !cli.include_raptor,
        }
    }
}

/// Build the request for one stateless query
///
/// Tuning fields are only set when they differ from what the server would
/// do anyway: `top_k` and `model` when supplied, `reranker_enabled: false`
/// only when reranking was disabled, `skip_raptor: false` only when RAPTOR
/// summaries were requested. `include_sources` and `max_sources` are
/// always sent, matching the server's console-demo conventions.
pub fn build_stateless_request(
    notebook_id: &str,
    query: &str,
    options: &QueryOptions,
) -> QueryRequest {
    let mut request = QueryRequest::new(notebook_id, query)
        .with_include_sources(true)
        .with_max_sources(options.max_sources);

    if let Some(model) = &options.model {
        request = request.with_model(model.clone());
    }
    if let Some(top_k) = options.top_k {
        request = request.with_top_k(top_k);
    }
    if !options.reranker_enabled {
        request = request.with_reranker_enabled(false);
    }
    if !options.skip_raptor {
        request = request.with_skip_raptor(false);
    }

    request
}

/// Build the request for one conversational turn
pub fn build_turn_request(
    notebook_id: &str,
    query: &str,
    session_id: Uuid,
    model: Option<&str>,
    max_history: u32,
) -> QueryRequest {
    let mut request = QueryRequest::new(notebook_id, query)
        .with_session(session_id)
        .with_include_sources(true)
        .with_max_sources(CONVERSATIONAL_MAX_SOURCES)
        .with_max_history(max_history);

    if let Some(model) = model {
        request = request.with_model(model.to_string());
    }

    request
}

/// Run a single stateless query and print the result
///
/// On failure the status and body (or the transport error) are reported
/// and `None` is returned; the request is never retried and the failure
/// never aborts the surrounding run.
pub async fn query_stateless(
    client: &QueryClient,
    notebook_id: &str,
    query: &str,
    options: &QueryOptions,
) -> Option<QueryResponse> {
    output::print_section("Stateless Query (No Memory)");
    println!("Query: {}", query);
    if let Some(model) = &options.model {
        println!("Model: {}", model);
    }
    if let Some(top_k) = options.top_k {
        println!("Top-K: {}", top_k);
    }
    if !options.reranker_enabled {
        println!("Reranker: disabled");
    }
    if !options.skip_raptor {
        println!("RAPTOR: enabled");
    }

    let request = build_stateless_request(notebook_id, query, options);
    match client.query(&request).await {
        Ok(result) => {
            output::print_query_response(&result);
            Some(result)
        }
        Err(error) => {
            report_request_failure(&error);
            None
        }
    }
}

/// Run a multi-turn conversation with server-side memory
///
/// Generates exactly one fresh session id for the whole conversation and
/// issues the turns sequentially. A failed turn is reported and skipped;
/// the remaining turns still run. Returns the session id that was used.
pub async fn query_conversational(
    client: &QueryClient,
    notebook_id: &str,
    queries: &[&str],
    model: Option<&str>,
    max_history: u32,
) -> Uuid {
    output::print_section("Conversational Queries (With Memory)");

    let session_id = Uuid::new_v4();
    println!("Session ID: {}", session_id);
    if let Some(model) = model {
        println!("Model: {}", model);
    }
    println!("Max History: {}", max_history);

    for (i, query) in queries.iter().enumerate() {
        println!("\n{}", output::divider());
        println!("Turn {}: {}", i + 1, query);
        println!("{}", output::divider());

        let request = build_turn_request(notebook_id, query, session_id, model, max_history);
        // Awaiting here is what enforces strict turn ordering: the next
        // turn is only built after this response has fully arrived.
        match client.query(&request).await {
            Ok(result) => output::print_turn_response(&result),
            Err(error) => report_request_failure(&error),
        }
    }

    session_id
}

/// Report a query failure once, distinguishing application failures
/// (status + raw body) from transport failures.
fn report_request_failure(error: &anyhow::Error) {
    match error.downcast_ref::<NbqueryError>() {
        Some(NbqueryError::Api { status, body }) => {
            println!("\nError: {} - {}", status, body);
        }
        _ => {
            println!("\nTransport error: {}", error);
        }
    }
}
