//! Error types for alert compilation

/// Errors that can occur while compiling an alert
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document retrieval failed: {0}")]
    Retrieval(String),

    #[error("No documents returned from index '{index}'")]
    NoHits { index: String },
}

/// Result type alias for alert compilation
pub type Result<T> = std::result::Result<T, AlertError>;
