use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, NewCategory};
use crate::database::repository::CategoryRepository;

/// Process-local gateway used for `--in-memory` runs and the HTTP test suite.
///
/// Each call takes the lock once, which gives it the same all-or-nothing
/// behaviour the Postgres gateway gets from its transaction.
#[derive(Default)]
pub struct MemoryCategoryRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, String>,
}

impl MemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn insert(&self, category: NewCategory) -> Result<Category, DatabaseError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = state.last_id;
        state.rows.insert(id, category.name.clone());
        Ok(Category {
            id,
            name: category.name,
        })
    }

    async fn update_by_id(&self, category: Category) -> Result<Category, DatabaseError> {
        let mut state = self.state.write().await;
        if let Some(name) = state.rows.get_mut(&category.id) {
            *name = category.name.clone();
        }
        Ok(category)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        self.state.write().await.rows.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Category, DatabaseError> {
        let state = self.state.read().await;
        state
            .rows
            .get(&id)
            .map(|name| Category {
                id,
                name: name.clone(),
            })
            .ok_or_else(|| DatabaseError::NotFound(format!("category {} not found", id)))
    }

    async fn find_all(&self) -> Result<Vec<Category>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .iter()
            .map(|(id, name)| Category {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }
}
