use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainlistError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP {status} from {url}: {body}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },

    #[error("catalog at {url} is not a JSON array (got {kind})")]
    Catalog { url: String, kind: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ChainlistError {
    /// Whether a failed upstream call is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChainlistError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ChainlistError::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChainlistError>;
