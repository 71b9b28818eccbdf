use async_trait::async_trait;
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error};

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, NewCategory};

/// Persistence gateway for the category table.
///
/// Implementations resolve every call on its own: either all of it is
/// committed or none of it is. None of the write operations check how many
/// rows they touched, so updating or deleting a missing id is a silent no-op.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new row and return it with the generated id
    async fn insert(&self, category: NewCategory) -> Result<Category, DatabaseError>;

    async fn update_by_id(&self, category: Category) -> Result<Category, DatabaseError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError>;

    /// `DatabaseError::NotFound` when no row has this id
    async fn find_by_id(&self, id: i64) -> Result<Category, DatabaseError>;

    /// All rows in creation order
    async fn find_all(&self) -> Result<Vec<Category>, DatabaseError>;
}

const INSERT_SQL: &str = "INSERT INTO category (name) VALUES ($1) RETURNING id, name";
const UPDATE_SQL: &str = "UPDATE category SET name = $1 WHERE id = $2";
const DELETE_SQL: &str = "DELETE FROM category WHERE id = $1";
const SELECT_ONE_SQL: &str = "SELECT id, name FROM category WHERE id = $1";
// BIGSERIAL ids only grow, so id order is insertion order
const SELECT_ALL_SQL: &str = "SELECT id, name FROM category ORDER BY id";

/// Postgres gateway; one transaction per call
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    /// Run one gateway operation under the statement deadline.
    ///
    /// Dropping `op` on expiry drops its open transaction, which rolls back.
    async fn bounded<T, F>(&self, operation: &'static str, op: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, DatabaseError>>,
    {
        debug!("category.{} started", operation);
        match tokio::time::timeout(self.statement_timeout, op).await {
            Ok(Err(DatabaseError::NotFound(msg))) => Err(DatabaseError::NotFound(msg)),
            Ok(Err(e)) => {
                error!("category.{} failed: {}", operation, e);
                Err(e)
            }
            Ok(ok) => ok,
            Err(_) => {
                error!(
                    "category.{} aborted after {:?}",
                    operation, self.statement_timeout
                );
                Err(DatabaseError::Timeout {
                    operation,
                    timeout: self.statement_timeout,
                })
            }
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn insert(&self, category: NewCategory) -> Result<Category, DatabaseError> {
        self.bounded("insert", async {
            let mut tx = self.pool.begin().await?;
            let created = sqlx::query_as::<_, Category>(INSERT_SQL)
                .bind(&category.name)
                .fetch_one(&mut *tx)
                .await?;
            tx.commit().await?;
            Ok::<_, DatabaseError>(created)
        })
        .await
    }

    async fn update_by_id(&self, category: Category) -> Result<Category, DatabaseError> {
        self.bounded("update_by_id", async {
            let mut tx = self.pool.begin().await?;
            let result = sqlx::query(UPDATE_SQL)
                .bind(&category.name)
                .bind(category.id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            debug!(
                "category {} updated ({} rows)",
                category.id,
                result.rows_affected()
            );
            Ok::<_, DatabaseError>(())
        })
        .await?;

        Ok(category)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        self.bounded("delete_by_id", async {
            let mut tx = self.pool.begin().await?;
            let result = sqlx::query(DELETE_SQL).bind(id).execute(&mut *tx).await?;
            tx.commit().await?;
            debug!("category {} deleted ({} rows)", id, result.rows_affected());
            Ok::<_, DatabaseError>(())
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Category, DatabaseError> {
        self.bounded("find_by_id", async {
            let mut tx = self.pool.begin().await?;
            let row = sqlx::query_as::<_, Category>(SELECT_ONE_SQL)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
            tx.commit().await?;
            row.ok_or_else(|| DatabaseError::NotFound(format!("category {} not found", id)))
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<Category>, DatabaseError> {
        self.bounded("find_all", async {
            let mut tx = self.pool.begin().await?;
            let rows = sqlx::query_as::<_, Category>(SELECT_ALL_SQL)
                .fetch_all(&mut *tx)
                .await?;
            tx.commit().await?;
            Ok::<_, DatabaseError>(rows)
        })
        .await
    }
}
