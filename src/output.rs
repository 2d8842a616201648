//! Presentation layer for nbquery
//!
//! Pure formatting over the typed response structures: section banners,
//! the model catalog, the notebook table, and query response rendering.
//! Absent optional fields are substituted with explicit placeholders
//! (`N/A`, `Unknown`) here and nowhere else. Render functions return
//! strings so they can be unit tested; the thin `print_*` wrappers are
//! what the command handlers call.

use crate::api::types::{Notebook, QueryResponse, Source};
use crate::models::MODEL_CATALOG;

use colored::Colorize;
use prettytable::{row, Table};
use std::fmt::Display;

/// Width of section rules, matching the API server's own console output
const RULE_WIDTH: usize = 60;

/// Maximum snippet preview length, in characters
const SNIPPET_PREVIEW_CHARS: usize = 200;

/// Maximum conversational response preview length, in characters
const TURN_PREVIEW_CHARS: usize = 500;

/// A full-width `=` rule
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// A full-width `─` divider
pub fn divider() -> String {
    "─".repeat(RULE_WIDTH)
}

/// Print a banner-style section header
pub fn print_section(title: &str) {
    println!("\n{}", rule());
    println!("{}", title.bold());
    println!("{}", rule());
}

/// Render the static model catalog grouped by provider
pub fn render_models() -> String {
    let mut out = String::new();
    for (provider, models) in MODEL_CATALOG {
        out.push_str(&format!("\n{}:\n", provider.to_uppercase()));
        for model in *models {
            out.push_str(&format!("  - {}\n", model));
        }
    }
    out
}

/// Print the model catalog with its section header
pub fn print_models() {
    print_section("Available Models");
    print!("{}", render_models());
    println!();
}

/// Render the notebook listing as a count line plus a table
pub fn render_notebooks(notebooks: &[Notebook]) -> String {
    let mut out = format!("\nFound {} notebook(s):\n\n", notebooks.len());
    if notebooks.is_empty() {
        return out;
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "Name", "Documents", "Created"]);
    for nb in notebooks {
        table.add_row(row![
            nb.id,
            nb.name,
            nb.document_count,
            nb.created_at.to_rfc3339()
        ]);
    }
    out.push_str(&table.to_string());
    out
}

/// Print the notebook listing
pub fn print_notebooks(notebooks: &[Notebook]) {
    print!("{}", render_notebooks(notebooks));
}

/// Render a stateless query response: answer, metadata block, timing
/// breakdown (when present), and numbered sources.
pub fn render_query_response(result: &QueryResponse) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", divider()));
    out.push_str("Response:\n");
    out.push_str(&format!("{}\n", divider()));
    out.push_str(&format!(
        "{}\n",
        result.response.as_deref().unwrap_or("No response")
    ));

    let metadata = &result.metadata;
    out.push_str(&format!("\n{}\n", divider()));
    out.push_str("Metadata:\n");
    out.push_str(&format!(
        "  Execution time: {}ms\n",
        fmt_opt(metadata.execution_time_ms.as_ref())
    ));
    out.push_str(&format!("  Model: {}\n", fmt_opt(metadata.model.as_ref())));
    out.push_str(&format!(
        "  Stateless: {}\n",
        fmt_opt(metadata.stateless.as_ref())
    ));
    out.push_str(&format!(
        "  Node count: {}\n",
        fmt_opt(metadata.node_count.as_ref())
    ));

    // BTreeMap iteration is already sorted by stage name
    if !metadata.timings.is_empty() {
        out.push_str("\n  Timing Breakdown:\n");
        for (key, value) in &metadata.timings {
            out.push_str(&format!("    {}: {}ms\n", humanize_stage(key), value));
        }
    }

    if !result.sources.is_empty() {
        out.push_str(&format!("\n{}\n", divider()));
        out.push_str(&format!("Sources ({}):\n", result.sources.len()));
        for (i, source) in result.sources.iter().enumerate() {
            out.push_str(&render_source(i + 1, source));
        }
    }

    out
}

/// Print a stateless query response
pub fn print_query_response(result: &QueryResponse) {
    print!("{}", render_query_response(result));
}

/// Render one conversational turn: a 500-char response preview and the
/// memory-related metadata fields.
pub fn render_turn_response(result: &QueryResponse) -> String {
    let response = result.response.as_deref().unwrap_or("No response");
    let metadata = &result.metadata;

    let mut out = format!(
        "\nResponse: {}...\n",
        truncate_chars(response, TURN_PREVIEW_CHARS)
    );
    out.push_str(&format!(
        "\nHistory used: {} messages\n",
        metadata.history_messages_used.unwrap_or(0)
    ));
    out.push_str(&format!(
        "Stateless: {}\n",
        fmt_opt(metadata.stateless.as_ref())
    ));
    out.push_str(&format!(
        "Execution time: {}ms\n",
        fmt_opt(metadata.execution_time_ms.as_ref())
    ));
    out
}

/// Print one conversational turn
pub fn print_turn_response(result: &QueryResponse) {
    print!("{}", render_turn_response(result));
}

fn render_source(number: usize, source: &Source) -> String {
    let filename = source.filename.as_deref().unwrap_or("Unknown");
    let score = match source.score {
        Some(score) => format!("{:.3}", score),
        None => "N/A".to_string(),
    };
    let snippet = truncate_chars(source.snippet.as_deref().unwrap_or(""), SNIPPET_PREVIEW_CHARS);
    format!(
        "\n  [{}] {}\n      Score: {}\n      Snippet: {}...\n",
        number, filename, score, snippet
    )
}

/// Humanize a timing stage key: drop a trailing `_ms`, replace underscores
/// with spaces, and title-case each word (`retrieval_ms` -> `Retrieval`).
pub fn humanize_stage(key: &str) -> String {
    let trimmed = key.strip_suffix("_ms").unwrap_or(key);
    trimmed
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a string to at most `max` characters, respecting char
/// boundaries (byte slicing would panic on multibyte content).
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn fmt_opt<T: Display>(value: Option<&T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}
