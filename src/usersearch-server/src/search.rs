use std::collections::HashMap;
use std::str::FromStr;

use usersearch_core::{OrderBy, User, ERROR_BAD_ORDER_FIELD};

use crate::dataset::UserSource;

/// Reasons a search request is rejected with a 400
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("{0}")]
    BadParam(String),

    #[error("{}", ERROR_BAD_ORDER_FIELD)]
    BadOrderField,
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Fields the user list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Age,
    Name,
}

impl FromStr for OrderField {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Id" => Ok(OrderField::Id),
            "Age" => Ok(OrderField::Age),
            // Empty means the default sort field
            "" | "Name" => Ok(OrderField::Name),
            _ => Err(SearchError::BadOrderField),
        }
    }
}

/// Parsed and validated search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub limit: usize,
    pub offset: usize,
    pub query: String,
    pub order_field: OrderField,
    pub order_by: OrderBy,
}

impl UserQuery {
    /// Parse raw query-string pairs.
    ///
    /// A missing `limit` means a full page, a missing `offset` means zero.
    /// `limit` is capped at `max_limit + 1`.
    pub fn parse(params: &HashMap<String, String>, max_limit: usize) -> Result<Self> {
        let limit = match params.get("limit") {
            Some(raw) => parse_count("limit", raw)?,
            None => max_limit,
        };
        let offset = match params.get("offset") {
            Some(raw) => parse_count("offset", raw)?,
            None => 0,
        };
        let order_by = match params.get("order_by") {
            Some(raw) => {
                let value: i64 = raw.parse().map_err(|_| {
                    SearchError::BadParam(format!("order_by {:?} is not an integer", raw))
                })?;
                OrderBy::try_from(value).map_err(|e| SearchError::BadParam(e.to_string()))?
            }
            None => OrderBy::AsIs,
        };
        let order_field = params
            .get("order_field")
            .map(String::as_str)
            .unwrap_or("")
            .parse()?;

        // One record past a full page lets clients detect that a next page exists
        Ok(Self {
            limit: limit.min(max_limit + 1),
            offset,
            query: params.get("query").cloned().unwrap_or_default(),
            order_field,
            order_by,
        })
    }
}

fn parse_count(name: &str, raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .map_err(|_| SearchError::BadParam(format!("{} must be a non-negative integer", name)))
}

/// Filter, sort and page the users held by `source`
pub fn search(source: &dyn UserSource, query: &UserQuery) -> Vec<User> {
    let mut matched: Vec<&User> = source
        .users()
        .iter()
        .filter(|u| {
            query.query.is_empty()
                || u.name.contains(&query.query)
                || u.about.contains(&query.query)
        })
        .collect();

    if query.order_by != OrderBy::AsIs {
        // sort_by is stable, so equal keys keep stored order
        matched.sort_by(|a, b| {
            let ord = match query.order_field {
                OrderField::Id => a.id.cmp(&b.id),
                OrderField::Age => a.age.cmp(&b.age),
                OrderField::Name => a.name.cmp(&b.name),
            };
            if query.order_by == OrderBy::Desc {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    matched
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .cloned()
        .collect()
}
