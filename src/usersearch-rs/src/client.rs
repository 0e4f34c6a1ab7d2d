use crate::{ClientError, Result};
use reqwest::{redirect, Client as HttpClient, StatusCode};
use std::time::Duration;
use usersearch_core::{
    ClientConfig, ErrorResponse, SearchParams, SearchRequest, SearchResponse, User,
    ACCESS_TOKEN_HEADER, ERROR_BAD_ORDER_FIELD,
};

/// Client for the user search API.
///
/// Configuration is fixed at construction and every call is independent, so a
/// single client can be cloned or shared across tasks freely.
#[derive(Clone)]
pub struct SearchClient {
    url: String,
    access_token: String,
    max_limit: i64,
    timeout: Duration,
    client: HttpClient,
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("url", &self.url)
            .field("max_limit", &self.max_limit)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SearchClient {
    /// Create a client with the default timeout and page limit
    pub fn new(url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::new(url, access_token))
    }

    /// Create a client from a full configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        if config.max_limit < 0 {
            return Err(ClientError::InvalidParam("max_limit must be >= 0"));
        }

        // 3xx must reach the status check instead of being followed
        let client = HttpClient::builder()
            .timeout(config.timeout())
            .redirect(redirect::Policy::none())
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            url: config.url.clone(),
            access_token: config.access_token.clone(),
            max_limit: config.max_limit,
            timeout: config.timeout(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_limit(&self) -> i64 {
        self.max_limit
    }

    /// Fetch one page of users.
    ///
    /// Asks the server for one record more than the page size; if it arrives,
    /// the extra record is dropped and `next_page` is set.
    #[tracing::instrument(
        skip(self, req),
        fields(url = %self.url, limit = req.limit, offset = req.offset)
    )]
    pub async fn find_users(&self, req: SearchRequest) -> Result<SearchResponse> {
        let (limit, params) = self.search_params(req)?;

        let response = self
            .client
            .get(&self.url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .query(&params)
            .send()
            .await
            .inspect_err(|e| tracing::debug!(error = %e, "Search request failed"))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Search response received");

        match status {
            StatusCode::OK => {
                let body = response.bytes().await?;
                let users: Vec<User> = serde_json::from_slice(&body)?;
                Ok(paginate(users, limit))
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::BAD_REQUEST => {
                let body = response.bytes().await?;
                let err: ErrorResponse = serde_json::from_slice(&body)?;
                if err.error == ERROR_BAD_ORDER_FIELD {
                    Err(ClientError::InvalidOrderField(params.order_field))
                } else {
                    Err(ClientError::UnknownError(err.error))
                }
            }
            other => Err(ClientError::UnexpectedStatus(other.as_u16())),
        }
    }
}

impl SearchClient {
    /// Validate a request and build the over-fetching query for it.
    /// Returns the effective page size alongside the params.
    fn search_params(&self, req: SearchRequest) -> Result<(i64, SearchParams)> {
        if req.limit < 0 {
            return Err(ClientError::InvalidParam("limit must be >= 0"));
        }
        if req.offset < 0 {
            return Err(ClientError::InvalidParam("offset must be >= 0"));
        }

        let limit = req.limit.min(self.max_limit);
        let params = SearchParams {
            limit: limit.saturating_add(1),
            offset: req.offset,
            query: req.query,
            order_field: req.order_field,
            order_by: req.order_by,
        };
        Ok((limit, params))
    }
}

/// Trim an over-fetched result back to `limit` records
fn paginate(mut users: Vec<User>, limit: i64) -> SearchResponse {
    let limit = limit as usize;
    let next_page = users.len() > limit;
    users.truncate(limit);
    SearchResponse { users, next_page }
}
