use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest page the search service hands out in a single response
pub const MAX_LIMIT: i64 = 25;

/// Header carrying the caller's access token
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

/// Reason code sent with a 400 when the sort field is structurally invalid
pub const ERROR_BAD_ORDER_FIELD: &str = "ErrorBadOrderField";

/// Reason code some deployments send for sort fields they do not recognize.
/// Clients treat it like any other unclassified reason.
pub const ERROR_UNKNOWN_ORDER_FIELD: &str = "ErrorBadOrderUnknown";

/// User represents a single record returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

/// OrderBy selects the sort direction, encoded on the wire as -1 / 0 / 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum OrderBy {
    Asc,
    #[default]
    AsIs,
    Desc,
}

impl From<OrderBy> for i64 {
    fn from(order: OrderBy) -> Self {
        match order {
            OrderBy::Asc => -1,
            OrderBy::AsIs => 0,
            OrderBy::Desc => 1,
        }
    }
}

impl TryFrom<i64> for OrderBy {
    type Error = InvalidOrderBy;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(OrderBy::Asc),
            0 => Ok(OrderBy::AsIs),
            1 => Ok(OrderBy::Desc),
            other => Err(InvalidOrderBy(other)),
        }
    }
}

/// Returned when an integer does not name a sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOrderBy(pub i64);

impl fmt::Display for InvalidOrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order_by must be -1, 0 or 1, got {}", self.0)
    }
}

impl std::error::Error for InvalidOrderBy {}

/// SearchRequest is what a caller asks the client for.
///
/// `limit` and `offset` are signed so that negative input can be represented
/// and rejected before anything goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub limit: i64,
    pub offset: i64,
    pub query: String,
    pub order_field: String,
    pub order_by: OrderBy,
}

impl SearchRequest {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            ..Default::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn ordered_by(mut self, field: impl Into<String>, order_by: OrderBy) -> Self {
        self.order_field = field.into();
        self.order_by = order_by;
        self
    }
}

/// SearchParams is the query string sent to the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub limit: i64,
    pub offset: i64,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub order_field: String,
    #[serde(default)]
    pub order_by: OrderBy,
}

/// SearchResponse is one page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub users: Vec<User>,
    /// True when at least one more record exists past this page
    pub next_page: bool,
}

/// ErrorResponse is the body of a 400 from the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_wire_values() {
        assert_eq!(serde_json::to_string(&OrderBy::Asc).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&OrderBy::AsIs).unwrap(), "0");
        assert_eq!(serde_json::to_string(&OrderBy::Desc).unwrap(), "1");

        let parsed: OrderBy = serde_json::from_str("-1").unwrap();
        assert_eq!(parsed, OrderBy::Asc);
        assert!(serde_json::from_str::<OrderBy>("2").is_err());
    }

    #[test]
    fn test_invalid_order_by_message() {
        let err = OrderBy::try_from(7).unwrap_err();
        assert_eq!(err.to_string(), "order_by must be -1, 0 or 1, got 7");
    }

    #[test]
    fn test_error_response_field_name() {
        let body = serde_json::to_string(&ErrorResponse::new(ERROR_BAD_ORDER_FIELD)).unwrap();
        assert_eq!(body, r#"{"Error":"ErrorBadOrderField"}"#);

        let parsed: ErrorResponse = serde_json::from_str(r#"{"Error":"anything"}"#).unwrap();
        assert_eq!(parsed.error, "anything");
    }

    #[test]
    fn test_user_wire_shape() {
        let json = concat!(
            r#"{"id":3,"name":"Everett Dillard","age":27,"#,
            r#""about":"Sint eu id","gender":"male"}"#
        );
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Everett Dillard");
        assert_eq!(user.gender, "male");
    }

    #[test]
    fn test_search_request_builders() {
        let req = SearchRequest::new(10, 5)
            .with_query("Boyd")
            .ordered_by("Age", OrderBy::Desc);
        assert_eq!(req.limit, 10);
        assert_eq!(req.offset, 5);
        assert_eq!(req.query, "Boyd");
        assert_eq!(req.order_field, "Age");
        assert_eq!(req.order_by, OrderBy::Desc);

        let default = SearchRequest::default();
        assert_eq!(default.order_by, OrderBy::AsIs);
        assert!(default.order_field.is_empty());
    }
}
