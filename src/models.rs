//! Static model catalog for the Query API
//!
//! The Query API accepts any model identifier and auto-detects the provider
//! server-side; this catalog is what `--list-models` prints so users can
//! discover the commonly deployed identifiers without a network call.

/// Known models grouped by provider, in display order.
pub const MODEL_CATALOG: &[(&str, &[&str])] = &[
    ("openai", &["gpt-4.1-mini", "gpt-4.1", "gpt-4o", "gpt-4o-mini"]),
    (
        "groq",
        &[
            "meta-llama/llama-4-maverick-17b-128e-instruct",
            "llama-3.3-70b-versatile",
        ],
    ),
    (
        "ollama",
        &["llama3.1:latest", "mistral:latest", "qwen2.5:latest"],
    ),
    (
        "anthropic",
        &["claude-sonnet-4-20250514", "claude-3-5-haiku-latest"],
    ),
    ("gemini", &["gemini-2.0-flash", "gemini-1.5-pro"]),
];
