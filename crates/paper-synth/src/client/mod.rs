//! Crossref API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Optional retry middleware with exponential backoff
//! - Silent degradation to an empty reference list on failure

pub(crate) mod middleware;

use reqwest_middleware::ClientWithMiddleware;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{Reference, Work, WorksResponse};

/// Source of references for a research question.
///
/// Implementations never fail: any error yields an empty list.
#[async_trait::async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Fetch at most `rows` references matching `query`, in relevance order.
    async fn fetch_references(&self, query: &str, rows: usize) -> Vec<Reference>;
}

/// Crossref `works` API client.
#[derive(Clone)]
pub struct CrossrefClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Crossref API base URL.
    api_url: String,

    /// Polite-pool contact address (optional).
    mailto: Option<String>,
}

impl CrossrefClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = middleware::build_client(
            config.reference_timeout,
            config.connect_timeout,
            config.max_retries,
        )?;

        Ok(Self {
            client,
            api_url: config.crossref_api_url.trim_end_matches('/').to_string(),
            mailto: config.crossref_mailto.clone(),
        })
    }

    /// Check if a polite-pool address is configured.
    #[must_use]
    pub fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }

    /// Search works by free text.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or malformed body.
    pub async fn search_works(&self, query: &str, rows: usize) -> ClientResult<Vec<Work>> {
        let url = format!("{}/works", self.api_url);

        let mut params = vec![
            ("query".to_string(), query.to_string()),
            ("rows".to_string(), rows.to_string()),
        ];

        if let Some(ref mailto) = self.mailto {
            params.push(("mailto".to_string(), mailto.clone()));
        }

        let response = self.client.get(&url).query(&params).send().await?;
        let response = handle_response(response).await?;

        let body = response.text().await?;
        let works: WorksResponse = serde_json::from_str(&body)?;

        tracing::debug!(
            items = works.message.items.len(),
            total = ?works.message.total_results,
            "Crossref search completed"
        );

        Ok(works.message.items)
    }
}

#[async_trait::async_trait]
impl ReferenceSource for CrossrefClient {
    async fn fetch_references(&self, query: &str, rows: usize) -> Vec<Reference> {
        match self.search_works(query, rows).await {
            Ok(items) => items.into_iter().take(rows).map(Reference::from).collect(),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    kind = e.kind(),
                    retry_after = ?e.retry_after(),
                    rows,
                    "Reference lookup failed, continuing without references"
                );
                Vec::new()
            }
        }
    }
}

/// Map API response status codes to errors.
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    // Only a plain 200 carries a works listing.
    if status == reqwest::StatusCode::OK {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(ClientError::rate_limited(retry_after))
        }
        404 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::not_found(text))
        }
        400 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::bad_request(text))
        }
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}

impl std::fmt::Debug for CrossrefClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossrefClient")
            .field("api_url", &self.api_url)
            .field("has_mailto", &self.has_mailto())
            .finish()
    }
}
