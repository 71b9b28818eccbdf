pub mod category;

pub use category::{
    to_category_responses, CategoryResponse, CreateCategoryRequest, UpdateCategoryBody,
    UpdateCategoryRequest,
};
