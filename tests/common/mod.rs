#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use category_api::database::{
    Category, CategoryRepository, DatabaseError, MemoryCategoryRepository, NewCategory,
};
use category_api::middleware::{ApiKeyAuthorizer, SharedAuthorizer};
use category_api::AppState;

pub const API_KEY: &str = "RAHASIA";

pub struct TestApp {
    pub router: Router,
    pub repository: Arc<MemoryCategoryRepository>,
}

/// Full gated router over a fresh in-memory gateway
pub fn app() -> TestApp {
    let repository = Arc::new(MemoryCategoryRepository::new());
    let router = router_with(repository.clone());
    TestApp { router, repository }
}

pub fn router_with(repository: Arc<dyn CategoryRepository>) -> Router {
    let authorizer: SharedAuthorizer = Arc::new(ApiKeyAuthorizer::new("X-API-Key", API_KEY));
    category_api::router(AppState::new(repository, None), authorizer)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }
}

/// Send one request; `key` of `None` omits the header
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    key: Option<&str>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok(TestResponse { status, body })
}

/// Send with the correct API key
pub async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> Result<TestResponse> {
    send(router, method, uri, body, Some(API_KEY)).await
}

pub async fn seed(repository: &MemoryCategoryRepository, name: &str) -> Result<Category> {
    Ok(repository
        .insert(NewCategory {
            name: name.to_string(),
        })
        .await?)
}

/// Gateway that fails every call the way a dropped connection would
pub struct BrokenRepository;

#[async_trait]
impl CategoryRepository for BrokenRepository {
    async fn insert(&self, _category: NewCategory) -> Result<Category, DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn update_by_id(&self, _category: Category) -> Result<Category, DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Category, DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn find_all(&self) -> Result<Vec<Category>, DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}
