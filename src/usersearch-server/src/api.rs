use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

use usersearch_core::{ErrorResponse, ACCESS_TOKEN_HEADER};

use crate::dataset::UserSource;
use crate::scenario::ScenarioTable;
use crate::search::{self, UserQuery};

/// Shared application state
pub struct AppState {
    pub source: Arc<dyn UserSource>,
    pub scenarios: ScenarioTable,
    pub access_token: String,
    pub max_limit: usize,
}

impl AppState {
    pub fn new(source: Arc<dyn UserSource>, access_token: impl Into<String>) -> Self {
        Self {
            source,
            scenarios: ScenarioTable::new(),
            access_token: access_token.into(),
            max_limit: usersearch_core::MAX_LIMIT as usize,
        }
    }

    pub fn with_scenarios(mut self, scenarios: ScenarioTable) -> Self {
        self.scenarios = scenarios;
        self
    }

    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }
}

/// Search users
/// GET /?limit=&offset=&query=&order_field=&order_by=
#[tracing::instrument(skip(http_req, params, state))]
pub async fn search_users(
    http_req: HttpRequest,
    params: web::Query<HashMap<String, String>>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let token = http_req
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if let Some(scenario) = state.scenarios.get(token) {
        tracing::debug!(?scenario, "Serving canned scenario");
        return Ok(scenario.respond().await);
    }

    if token != state.access_token {
        tracing::debug!("Rejecting request with bad access token");
        return Ok(HttpResponse::Unauthorized().finish());
    }

    let query = match UserQuery::parse(&params, state.max_limit) {
        Ok(query) => query,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting search parameters");
            return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string())));
        }
    };

    let users = search::search(state.source.as_ref(), &query);
    tracing::debug!(
        limit = query.limit,
        offset = query.offset,
        returned = users.len(),
        "Search complete"
    );

    Ok(HttpResponse::Ok().json(users))
}

/// Health check
/// GET /health
pub async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now()
    })))
}

/// Configure routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(search_users))
        .route("/users", web::get().to(search_users))
        .route("/health", web::get().to(health));
}
