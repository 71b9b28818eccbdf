pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryCategoryRepository;
pub use models::{Category, NewCategory};
pub use repository::{CategoryRepository, PgCategoryRepository};
