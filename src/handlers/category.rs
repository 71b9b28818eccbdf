use axum::extract::State;

use crate::api::{CategoryResponse, CreateCategoryRequest, UpdateCategoryBody};
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

use super::extract::{CategoryId, JsonBody};

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CategoryResponse>> {
    let categories = state.categories.find_all().await?;
    Ok(ApiResponse::success(categories))
}

/// GET /api/categories/:id
pub async fn get(
    State(state): State<AppState>,
    CategoryId(id): CategoryId,
) -> ApiResult<CategoryResponse> {
    let category = state.categories.find_by_id(id).await?;
    Ok(ApiResponse::success(category))
}

/// POST /api/categories - answers 200, not 201
pub async fn create(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateCategoryRequest>,
) -> ApiResult<CategoryResponse> {
    let category = state.categories.create(request).await?;
    Ok(ApiResponse::success(category))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<AppState>,
    CategoryId(id): CategoryId,
    JsonBody(body): JsonBody<UpdateCategoryBody>,
) -> ApiResult<CategoryResponse> {
    let category = state.categories.update(body.with_id(id)).await?;
    Ok(ApiResponse::success(category))
}

/// DELETE /api/categories/:id
pub async fn delete(
    State(state): State<AppState>,
    CategoryId(id): CategoryId,
) -> ApiResult<()> {
    state.categories.delete(id).await?;
    Ok(ApiResponse::empty())
}
