use serde::{Deserialize, Serialize};

use crate::database::models::Category;

/// Body of `POST /api/categories`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCategoryRequest {
    // Absent and empty are both reported by validation, not by the decoder
    #[serde(default)]
    pub name: String,
}

/// Body of `PUT /api/categories/:id`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateCategoryBody {
    #[serde(default)]
    pub name: String,
}

/// Update request after the path id has been merged in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCategoryRequest {
    pub id: i64,
    pub name: String,
}

impl UpdateCategoryBody {
    pub fn with_id(self, id: i64) -> UpdateCategoryRequest {
        UpdateCategoryRequest {
            id,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

pub fn to_category_responses(categories: Vec<Category>) -> Vec<CategoryResponse> {
    categories.into_iter().map(CategoryResponse::from).collect()
}
