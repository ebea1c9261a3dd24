use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("request rejected as unauthorized by {url} (HTTP {status})")]
    Unauthorized { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("pagination limit reached for set {set_id}: exceeded {max_pages} pages")]
    PaginationLimit { set_id: String, max_pages: usize },
}
