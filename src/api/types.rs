//! Wire types for the DBNotebook Query API
//!
//! Request types follow a sparse-payload policy: optional fields are only
//! serialized when the caller explicitly supplied them, so the server's own
//! defaults apply to everything left unset. Response types model every
//! field the server may omit as an `Option`, and the presentation layer
//! decides how to render the absent case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A notebook as returned by `GET /api/query/notebooks`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    /// Notebook UUID
    pub id: String,
    /// Display name
    pub name: String,
    /// Number of ingested documents
    #[serde(default)]
    pub document_count: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Envelope for the notebook listing endpoint
#[derive(Debug, Deserialize)]
pub struct NotebookListResponse {
    #[serde(default)]
    pub notebooks: Vec<Notebook>,
}

/// Request body for `POST /api/query`
///
/// Only `notebook_id` and `query` are required. Every other field is
/// skipped during serialization unless set, which is what keeps the
/// payload sparse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// UUID of the notebook to query
    pub notebook_id: String,
    /// Natural language question
    pub query: String,

    /// Client-generated UUID for conversation memory; absent means stateless
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    /// Max history messages to apply (1-20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<u32>,

    /// LLM model name; the server auto-detects the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Include source documents in the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_sources: Option<bool>,
    /// Max sources in the response (1-20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sources: Option<u32>,
    /// Retrieval chunk count (1-50)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Enable or disable the reranking stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reranker_enabled: Option<bool>,
    /// Custom reranker model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reranker_model: Option<String>,
    /// Skip RAPTOR hierarchical summaries (server default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_raptor: Option<bool>,
}

impl QueryRequest {
    /// Create a request with only the required fields set
    pub fn new(notebook_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            notebook_id: notebook_id.into(),
            query: query.into(),
            session_id: None,
            max_history: None,
            model: None,
            include_sources: None,
            max_sources: None,
            top_k: None,
            reranker_enabled: None,
            reranker_model: None,
            skip_raptor: None,
        }
    }

    /// Attach a conversation session id
    pub fn with_session(mut self, session_id: Uuid) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Cap the number of history messages applied server-side
    pub fn with_max_history(mut self, max_history: u32) -> Self {
        self.max_history = Some(max_history);
        self
    }

    /// Select an LLM model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Request source documents in the response
    pub fn with_include_sources(mut self, include: bool) -> Self {
        self.include_sources = Some(include);
        self
    }

    /// Cap the number of sources returned
    pub fn with_max_sources(mut self, max_sources: u32) -> Self {
        self.max_sources = Some(max_sources);
        self
    }

    /// Set the retrieval chunk count
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Toggle the reranking stage
    pub fn with_reranker_enabled(mut self, enabled: bool) -> Self {
        self.reranker_enabled = Some(enabled);
        self
    }

    /// Select a custom reranker model
    pub fn with_reranker_model(mut self, model: impl Into<String>) -> Self {
        self.reranker_model = Some(model.into());
        self
    }

    /// Toggle RAPTOR summary skipping
    pub fn with_skip_raptor(mut self, skip: bool) -> Self {
        self.skip_raptor = Some(skip);
        self
    }
}

/// Execution metadata attached to a query response
///
/// Every field is optional on the wire; a server that omits one gets an
/// explicit placeholder at render time instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryMetadata {
    /// Total execution time in milliseconds
    pub execution_time_ms: Option<u64>,
    /// Model that produced the answer
    pub model: Option<String>,
    /// Whether the query ran without conversation memory
    pub stateless: Option<bool>,
    /// Number of retrieved nodes used
    pub node_count: Option<u64>,
    /// Per-stage timing breakdown (stage name -> milliseconds). A BTreeMap
    /// keeps iteration sorted by key for display.
    #[serde(default)]
    pub timings: BTreeMap<String, f64>,
    /// History messages applied to this turn
    pub history_messages_used: Option<u32>,
}

/// A retrieved source document reference
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub filename: Option<String>,
    pub score: Option<f64>,
    pub snippet: Option<String>,
}

/// Response body for `POST /api/query`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Generated answer text
    pub response: Option<String>,
    #[serde(default)]
    pub metadata: QueryMetadata,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_request_serializes_required_fields_only() {
        let request = QueryRequest::new("nb-1", "What is the policy?");
        let value = serde_json::to_value(&request).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["notebook_id"], "nb-1");
        assert_eq!(obj["query"], "What is the policy?");
    }

    #[test]
    fn test_unset_tuning_fields_are_omitted() {
        // top_k and reranker_enabled left unset must not appear at all
        let request = QueryRequest::new("nb-1", "q")
            .with_include_sources(true)
            .with_max_sources(6);
        let value = serde_json::to_value(&request).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("top_k"));
        assert!(!obj.contains_key("reranker_enabled"));
        assert!(!obj.contains_key("skip_raptor"));
        assert!(!obj.contains_key("session_id"));
        assert!(!obj.contains_key("model"));
    }

    #[test]
    fn test_supplied_tuning_fields_serialize_exactly() {
        let request = QueryRequest::new("nb-1", "q")
            .with_top_k(10)
            .with_reranker_enabled(false);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["top_k"], json!(10));
        assert_eq!(value["reranker_enabled"], json!(false));
    }

    #[test]
    fn test_session_fields_serialize() {
        let session_id = Uuid::new_v4();
        let request = QueryRequest::new("nb-1", "q")
            .with_session(session_id)
            .with_max_history(5);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["session_id"], json!(session_id.to_string()));
        assert_eq!(value["max_history"], json!(5));
    }

    #[test]
    fn test_notebook_deserializes() {
        let data = json!({
            "id": "abc",
            "name": "HR Docs",
            "document_count": 3,
            "created_at": "2024-01-01T00:00:00Z"
        });
        let notebook: Notebook = serde_json::from_value(data).unwrap();
        assert_eq!(notebook.id, "abc");
        assert_eq!(notebook.name, "HR Docs");
        assert_eq!(notebook.document_count, 3);
        assert_eq!(notebook.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_notebook_list_defaults_to_empty() {
        let list: NotebookListResponse = serde_json::from_str("{}").unwrap();
        assert!(list.notebooks.is_empty());
    }

    #[test]
    fn test_query_response_deserializes_full_shape() {
        let data = json!({
            "response": "The policy allows...",
            "metadata": {
                "execution_time_ms": 120,
                "model": "gpt-4o",
                "stateless": true,
                "node_count": 4,
                "timings": {"retrieval_ms": 80.0, "generation_ms": 35.5}
            },
            "sources": [
                {"filename": "handbook.pdf", "score": 0.87, "snippet": "Employees may..."}
            ]
        });
        let response: QueryResponse = serde_json::from_value(data).unwrap();
        assert_eq!(response.response.as_deref(), Some("The policy allows..."));
        assert_eq!(response.metadata.execution_time_ms, Some(120));
        assert_eq!(response.metadata.model.as_deref(), Some("gpt-4o"));
        assert_eq!(response.metadata.stateless, Some(true));
        assert_eq!(response.metadata.node_count, Some(4));
        assert_eq!(response.metadata.timings.len(), 2);
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].filename.as_deref(), Some("handbook.pdf"));
    }

    #[test]
    fn test_query_response_tolerates_missing_fields() {
        // Server success with missing fields must still parse; rendering
        // substitutes placeholders later.
        let response: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.response.is_none());
        assert!(response.metadata.execution_time_ms.is_none());
        assert!(response.metadata.timings.is_empty());
        assert!(response.sources.is_empty());
    }

    #[test]
    fn test_timings_iterate_sorted_by_key() {
        let data = json!({
            "metadata": {"timings": {"z_stage_ms": 1.0, "a_stage_ms": 2.0, "m_stage_ms": 3.0}}
        });
        let response: QueryResponse = serde_json::from_value(data).unwrap();
        let keys: Vec<&str> = response
            .metadata
            .timings
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["a_stage_ms", "m_stage_ms", "z_stage_ms"]);
    }
}
