use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::config::SecurityConfig;
use crate::error::ApiError;

/// Outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Deny(String),
}

/// Pluggable request filter consulted before routing
pub trait Authorizer: Send + Sync {
    fn authorize(&self, request: &Request) -> AuthDecision;
}

pub type SharedAuthorizer = Arc<dyn Authorizer>;

/// Shared-secret check against a single request header
#[derive(Debug, Clone)]
pub struct ApiKeyAuthorizer {
    header: String,
    key: String,
}

impl ApiKeyAuthorizer {
    pub fn new(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            key: key.into(),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(security.api_key_header.clone(), security.api_key.clone())
    }
}

impl Authorizer for ApiKeyAuthorizer {
    fn authorize(&self, request: &Request) -> AuthDecision {
        // An unset key must never match an empty header
        if self.key.is_empty() {
            return AuthDecision::Deny("API key not configured".to_string());
        }

        match request.headers().get(self.header.as_str()) {
            None => AuthDecision::Deny(format!("Missing {} header", self.header)),
            Some(value) if value.as_bytes() == self.key.as_bytes() => AuthDecision::Allow,
            Some(_) => AuthDecision::Deny(format!("Invalid {} header", self.header)),
        }
    }
}

/// Gate in front of the router: denied requests never reach a handler
pub async fn auth_gate(
    State(authorizer): State<SharedAuthorizer>,
    request: Request,
    next: Next,
) -> Response {
    match authorizer.authorize(&request) {
        AuthDecision::Allow => next.run(request).await,
        AuthDecision::Deny(reason) => {
            tracing::warn!(
                "Rejected {} {}: {}",
                request.method(),
                request.uri().path(),
                reason
            );
            ApiError::unauthorized(reason).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/categories");
        if let Some(value) = header {
            builder = builder.header("X-API-Key", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn allows_matching_key() {
        let auth = ApiKeyAuthorizer::new("X-API-Key", "RAHASIA");
        assert_eq!(auth.authorize(&request_with(Some("RAHASIA"))), AuthDecision::Allow);
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let auth = ApiKeyAuthorizer::new("x-api-key", "RAHASIA");
        assert_eq!(auth.authorize(&request_with(Some("RAHASIA"))), AuthDecision::Allow);
    }

    #[test]
    fn denies_missing_or_wrong_key() {
        let auth = ApiKeyAuthorizer::new("X-API-Key", "RAHASIA");
        assert!(matches!(auth.authorize(&request_with(None)), AuthDecision::Deny(_)));
        assert!(matches!(
            auth.authorize(&request_with(Some("rahasia"))),
            AuthDecision::Deny(_)
        ));
    }

    #[test]
    fn empty_configured_key_denies_everything() {
        let auth = ApiKeyAuthorizer::new("X-API-Key", "");
        assert!(matches!(auth.authorize(&request_with(Some(""))), AuthDecision::Deny(_)));
    }
}
