/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint.

It exposes three modules:

- `notebooks` — Notebook listing and the notebook resolution policy
- `query`     — Stateless and conversational query executors
- `run`       — The top-level run flow (banner, listing, resolution,
                ad-hoc query, demo sequence)

These handlers are intentionally small and use the library components:
the API client, the wire types, and the presentation layer.
*/

pub mod notebooks;
pub mod query;
pub mod run;

pub use query::QueryOptions;
pub use run::RunOptions;
