//! Document retrieval from the search backend

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::EsConfig;
use crate::document::Document;
use crate::io::HttpClient;

/// Retrieves raw documents for a set of ids
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait DocumentFetcher: Send + Sync {
    /// Return the hits matching `ids` in `index`, in backend order
    async fn find_by_ids(&self, index: &str, ids: &[String]) -> crate::Result<Vec<Document>>;
}

/// Build a search body selecting exactly the given document ids
pub fn build_ids_query(ids: &[String]) -> Value {
    json!({
        "query": {
            "ids": {
                "values": ids,
            }
        },
        "size": ids.len(),
    })
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    #[serde(default)]
    hits: Vec<Value>,
}

/// Fetcher backed by the Elasticsearch `_search` API
pub struct ElasticsearchFetcher {
    base_url: String,
    authorization: Option<String>,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ElasticsearchFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchFetcher")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ElasticsearchFetcher {
    pub fn new(config: &EsConfig, http: Arc<dyn HttpClient>) -> crate::Result<Self> {
        let base_url = config
            .addresses
            .first()
            .ok_or_else(|| {
                crate::AlertError::Config("Elasticsearch addresses must not be empty".to_string())
            })?
            .trim_end_matches('/')
            .to_string();

        let authorization = config.username.as_ref().map(|username| {
            let password = config.password.as_deref().unwrap_or_default();
            let credentials = base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", username, password));
            format!("Basic {}", credentials)
        });

        tracing::debug!(
            "Created ElasticsearchFetcher at {} (version {})",
            base_url,
            config.version
        );

        Ok(Self {
            base_url,
            authorization,
            http,
        })
    }
}

#[async_trait]
impl DocumentFetcher for ElasticsearchFetcher {
    async fn find_by_ids(&self, index: &str, ids: &[String]) -> crate::Result<Vec<Document>> {
        let url = format!("{}/{}/_search", self.base_url, index);
        let body = build_ids_query(ids).to_string();

        let mut headers = Vec::new();
        if let Some(authorization) = &self.authorization {
            headers.push(("Authorization", authorization.as_str()));
        }

        tracing::debug!("Fetching {} documents from '{}'", ids.len(), index);
        let response = self
            .http
            .post_json(&url, &body, &headers)
            .await
            .map_err(|e| crate::AlertError::Retrieval(e.to_string()))?;

        if response.status != 200 {
            return Err(crate::AlertError::Retrieval(format!(
                "search on '{}' returned status {}: {}",
                index, response.status, response.body
            )));
        }

        let parsed: SearchResponse = serde_json::from_str(&response.body).map_err(|e| {
            crate::AlertError::Retrieval(format!("malformed search response: {}", e))
        })?;

        tracing::debug!("Fetched {} hits from '{}'", parsed.hits.hits.len(), index);
        Ok(parsed.hits.hits.into_iter().map(Document::from_hit).collect())
    }
}
