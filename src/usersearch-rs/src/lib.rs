//! usersearch Client Library
//!
//! HTTP client for the paginated user search API.

mod client;

pub use client::SearchClient;
pub use usersearch_core::{
    ClientConfig, OrderBy, SearchRequest, SearchResponse, User, ERROR_BAD_ORDER_FIELD,
    ERROR_UNKNOWN_ORDER_FIELD, MAX_LIMIT,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid parameter: {0}")]
    InvalidParam(&'static str),

    #[error("bad access token")]
    Unauthorized,

    #[error("order field {0:?} is invalid")]
    InvalidOrderField(String),

    #[error("unknown bad request error: {0}")]
    UnknownError(String),

    #[error("can't decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP transport failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ClientError {
    /// Whether an identical call made later could succeed.
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Timeout | ClientError::Transport(_) => true,
            ClientError::UnexpectedStatus(status) => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
