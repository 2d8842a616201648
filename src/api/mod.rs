//! HTTP client for the DBNotebook Query API
//!
//! `QueryClient` is a thin authenticated wrapper over the two endpoints the
//! tool exercises: the notebook catalog (`GET /api/query/notebooks`) and the
//! query endpoint (`POST /api/query`). It performs no retries and keeps no
//! state beyond the reqwest client and the resolved configuration values;
//! exactly one request is in flight at any time.

pub mod types;

use crate::config::Config;
use crate::error::{NbqueryError, Result};

use reqwest::Client;
use std::time::Duration;

pub use types::{
    Notebook, NotebookListResponse, QueryMetadata, QueryRequest, QueryResponse, Source,
};

/// Header carrying the API key on every request
const API_KEY_HEADER: &str = "X-API-Key";

/// Authenticated client for the Query API
///
/// # Examples
///
/// ```no_run
/// use nbquery::api::QueryClient;
/// use nbquery::config::Config;
///
/// # async fn example() -> nbquery::error::Result<()> {
/// let config = Config {
///     base_url: "http://localhost:7860".to_string(),
///     api_key: "dbn_00000000000000000000000000000001".to_string(),
///     notebook_id: "18ee0c23-a2ce-4eb2-a56c-62a12dee964a".to_string(),
/// };
/// let client = QueryClient::new(&config)?;
/// let notebooks = client.list_notebooks().await?;
/// # Ok(())
/// # }
/// ```
pub struct QueryClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl QueryClient {
    /// Create a new client from the resolved configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("nbquery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(NbqueryError::Http)?;

        tracing::debug!("Initialized Query API client: base_url={}", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// The base URL this client targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all notebooks visible to this API key
    ///
    /// Returns the notebooks in server-defined order; the ordering is
    /// treated as opaque by callers (the resolution policy relies on "first
    /// listed" only).
    ///
    /// # Errors
    ///
    /// Returns `NbqueryError::Api` with the status code and raw body on any
    /// non-2xx response, or `NbqueryError::Http` on transport failure.
    pub async fn list_notebooks(&self) -> Result<Vec<Notebook>> {
        let url = format!("{}/api/query/notebooks", self.base_url);
        tracing::debug!("Listing notebooks: {}", url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(NbqueryError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Notebook listing failed: {} - {}", status, body);
            return Err(NbqueryError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let list: NotebookListResponse = response.json().await.map_err(NbqueryError::Http)?;
        tracing::info!("Listed {} notebook(s)", list.notebooks.len());
        Ok(list.notebooks)
    }

    /// Issue one query request and wait for the response
    ///
    /// The request body is serialized sparsely: fields the caller never set
    /// are absent from the JSON, so the server's own defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `NbqueryError::Api` with the status code and raw body on any
    /// non-2xx response, or `NbqueryError::Http` on transport failure.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let url = format!("{}/api/query", self.base_url);
        tracing::debug!(
            "Querying notebook {} (session: {:?})",
            request.notebook_id,
            request.session_id
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(NbqueryError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Query failed: {} - {}", status, body);
            return Err(NbqueryError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let result: QueryResponse = response.json().await.map_err(NbqueryError::Http)?;
        Ok(result)
    }
}
