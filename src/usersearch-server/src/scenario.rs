//! Canned failure responses for exercising clients.
//!
//! A [`ScenarioTable`] maps a scenario key to a [`Scenario`]. The search
//! handler looks the presented access token up here before doing any real
//! token validation, so tests can select a failure mode per request.

use actix_web::{http::StatusCode, HttpResponse};
use std::collections::HashMap;
use std::time::Duration;

use usersearch_core::{ErrorResponse, ERROR_BAD_ORDER_FIELD, ERROR_UNKNOWN_ORDER_FIELD};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scenario {
    /// 200 with a body that is not JSON
    MalformedJson,
    /// 500 with an empty body
    InternalError,
    /// 400 with an empty body
    BadRequestNoBody,
    /// 400 with the given reason in an error body
    BadRequest(String),
    /// Wait, then answer with an empty body and the given status
    Delay { after: Duration, status: StatusCode },
    /// Answer immediately with an empty body and the given status
    Status(StatusCode),
}

impl Scenario {
    pub async fn respond(&self) -> HttpResponse {
        match self {
            Scenario::MalformedJson => HttpResponse::Ok()
                .content_type("application/json")
                .body("{]"),
            Scenario::InternalError => HttpResponse::InternalServerError().finish(),
            Scenario::BadRequestNoBody => HttpResponse::BadRequest().finish(),
            Scenario::BadRequest(reason) => {
                HttpResponse::BadRequest().json(ErrorResponse::new(reason.clone()))
            }
            Scenario::Delay { after, status } => {
                tokio::time::sleep(*after).await;
                HttpResponse::build(*status).finish()
            }
            Scenario::Status(status) => HttpResponse::build(*status).finish(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioTable {
    scenarios: HashMap<String, Scenario>,
}

impl ScenarioTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The set of failure modes the integration tests rely on
    pub fn standard() -> Self {
        Self::new()
            .with("json", Scenario::MalformedJson)
            .with("internal", Scenario::InternalError)
            .with("request", Scenario::BadRequestNoBody)
            .with(
                "requestBadOrder",
                Scenario::BadRequest(ERROR_BAD_ORDER_FIELD.to_string()),
            )
            .with(
                "requestBadOrderUnknown",
                Scenario::BadRequest(ERROR_UNKNOWN_ORDER_FIELD.to_string()),
            )
            .with(
                "timeout",
                Scenario::Delay {
                    after: Duration::from_millis(1500),
                    status: StatusCode::FOUND,
                },
            )
    }

    pub fn with(mut self, key: impl Into<String>, scenario: Scenario) -> Self {
        self.scenarios.insert(key.into(), scenario);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Scenario> {
        self.scenarios.get(key)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = ScenarioTable::standard();
        assert_eq!(table.len(), 6);
        assert_eq!(table.get("internal"), Some(&Scenario::InternalError));
        assert!(table.get("Test").is_none());
    }

    #[actix_web::test]
    async fn test_bad_request_body() {
        let resp = Scenario::BadRequest("boom".to_string()).respond().await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], br#"{"Error":"boom"}"#);
    }

    #[actix_web::test]
    async fn test_delay_waits() {
        let scenario = Scenario::Delay {
            after: Duration::from_millis(50),
            status: StatusCode::FOUND,
        };
        let started = std::time::Instant::now();
        let resp = scenario.respond().await;
        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(resp.status(), StatusCode::FOUND);
    }
}
