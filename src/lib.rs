//! nbquery - DBNotebook Query API client library
//!
//! This library backs the `nbquery` binary: a client/demo harness for the
//! DBNotebook Query API that lists notebooks, runs stateless queries, and
//! runs multi-turn conversational queries with server-side session memory.
//!
//! # Architecture
//!
//! - `api`: Wire types and the authenticated HTTP client
//! - `commands`: Command handlers (listing, query executors, run flow)
//! - `config`: Effective runtime configuration, resolved once at startup
//! - `output`: Presentation layer (banners, tables, response rendering)
//! - `models`: Static model catalog grouped by provider
//! - `error`: Error types and result alias
//! - `cli`: Command-line interface definition

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use api::{QueryClient, QueryRequest, QueryResponse};
pub use cli::Cli;
pub use config::Config;
pub use error::{NbqueryError, Result};
