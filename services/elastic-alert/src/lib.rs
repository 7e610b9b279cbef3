//! Elastic Alert - compiles matched log documents into alert receiver payloads
//!
//! Fetches the documents behind a rule match, extracts the well-known log
//! fields, renders the rule's annotation templates and assembles the
//! webhook payload consumed by the alert receiver.

pub mod alert;
pub mod compiler;
pub mod config;
pub mod context;
pub mod dedup;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod io;
pub mod payload;
pub mod render;

pub use alert::{AlertContent, AlertMessage, AlertSampleMessage, AlertState, Match, Rule};
pub use compiler::AlertCompiler;
pub use config::{load_config, Config};
pub use error::{AlertError, Result};

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fetcher::ElasticsearchFetcher;
use crate::io::{HttpClient, ReqwestHttpClient};

/// A self-contained compilation job, as read from an input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileRequest {
    pub rule: Rule,
    #[serde(rename = "match")]
    pub matched: Match,
    pub sample: AlertSampleMessage,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl CompileRequest {
    pub fn content(&self) -> AlertContent<'_> {
        match self.ends_at {
            Some(ends_at) => {
                AlertContent::resolved(&self.rule, &self.matched, self.starts_at, ends_at)
            }
            None => AlertContent::pending(&self.rule, &self.matched, self.starts_at),
        }
    }
}

/// Compiled output of a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileOutput {
    pub message: AlertMessage,
    pub dedup_key: String,
}

/// Load a compile request from a JSON file
pub fn load_request(path: &Path) -> Result<CompileRequest> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AlertError::Config(format!("Failed to read request file {:?}: {}", path, e))
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Compile a request against Elasticsearch using the given HTTP client
pub async fn compile_request(
    config: &Config,
    request: &CompileRequest,
    http: Arc<dyn HttpClient>,
) -> Result<CompileOutput> {
    let es = request
        .sample
        .es
        .as_ref()
        .or(config.es.as_ref())
        .cloned()
        .unwrap_or_default();
    let fetcher = ElasticsearchFetcher::new(&es, http)?;

    let content = request.content();
    let compiler = AlertCompiler::from_config(config);
    let message = compiler
        .compile(&content, &config.generator_url, &request.sample, &fetcher)
        .await?;

    Ok(CompileOutput {
        message,
        dedup_key: content.dedup_key(),
    })
}

/// Compile a request using the production HTTP client
pub async fn run(config: &Config, request: &CompileRequest) -> Result<CompileOutput> {
    compile_request(config, request, Arc::new(ReqwestHttpClient::new())).await
}
