use std::sync::Arc;

use crate::api::{
    to_category_responses, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::database::manager::DatabaseError;
use crate::database::models::{Category, NewCategory};
use crate::database::repository::CategoryRepository;
use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(DatabaseError),
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Database(other),
        }
    }
}

/// Validates write requests, drives the gateway and shapes responses
#[derive(Clone)]
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<CategoryResponse, ServiceError> {
        request.validate()?;

        let category = self
            .repository
            .insert(NewCategory { name: request.name })
            .await?;

        tracing::info!("Created category {}", category.id);
        Ok(category.into())
    }

    /// Updates by id without checking that the row exists
    pub async fn update(
        &self,
        request: UpdateCategoryRequest,
    ) -> Result<CategoryResponse, ServiceError> {
        request.validate()?;

        let category = self
            .repository
            .update_by_id(Category {
                id: request.id,
                name: request.name,
            })
            .await?;

        Ok(category.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.repository.delete_by_id(id).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<CategoryResponse, ServiceError> {
        let category = self.repository.find_by_id(id).await?;
        Ok(category.into())
    }

    pub async fn find_all(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let categories = self.repository.find_all().await?;
        Ok(to_category_responses(categories))
    }
}
