//! Notebook listing and resolution
//!
//! Listing is a single authenticated read of the notebook catalog. The
//! resolution policy decides which notebook the run actually queries: the
//! configured id when the server lists it, otherwise the first listed
//! notebook (with the substitution reported, never silent), and no
//! notebook at all when the listing is empty.

use crate::api::{Notebook, QueryClient};
use crate::error::Result;
use crate::output;

/// List all notebooks and print them
///
/// # Errors
///
/// A non-success status or transport failure is printed and then returned
/// to the caller, which decides whether the run can continue. The demo
/// flow treats a listing failure as fatal.
pub async fn list_notebooks(client: &QueryClient) -> Result<Vec<Notebook>> {
    output::print_section("Listing Available Notebooks");

    match client.list_notebooks().await {
        Ok(notebooks) => {
            output::print_notebooks(&notebooks);
            Ok(notebooks)
        }
        Err(error) => {
            println!("Error: {}", error);
            Err(error)
        }
    }
}

/// Apply the notebook resolution policy
///
/// Returns the notebook id the run should query, or `None` when the
/// listing is empty (in which case no query must be attempted).
///
/// If `requested` is not among the listed ids, the first listed notebook
/// is substituted and the substitution is reported on stdout and via a
/// warn-level trace event.
pub fn resolve_notebook(requested: &str, notebooks: &[Notebook]) -> Option<String> {
    if notebooks.is_empty() {
        return None;
    }

    if notebooks.iter().any(|nb| nb.id == requested) {
        return Some(requested.to_string());
    }

    let fallback = notebooks[0].id.clone();
    tracing::warn!(
        "Requested notebook {} not listed, substituting {}",
        requested,
        fallback
    );
    println!("\nSpecified notebook not found, using: {}", fallback);
    Some(fallback)
}
