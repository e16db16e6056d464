use crate::domain::{Category, CategoryId};
use crate::ports::category_repository::CategoryRepository as CategoryRepositoryTrait;
use crate::ports::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::map_sqlx_error;

fn map_row_to_category(row: &PgRow) -> Category {
    Category {
        id: CategoryId::new(row.get("id")),
        name: row.get("nombre"),
    }
}

/// PostgreSQL implementation of CategoryRepository
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn insert(&self, name: &str) -> Result<Category> {
        let row = sqlx::query("INSERT INTO categoria (nombre) VALUES ($1) RETURNING id, nombre")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(map_row_to_category(&row))
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, nombre FROM categoria WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_category))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, nombre FROM categoria WHERE nombre = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_category))
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, nombre FROM categoria ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(map_row_to_category).collect())
    }

    /// Delete a category
    ///
    /// The RESTRICT foreign key on `libro.categoria_id` rejects the delete while
    /// any book still references the category.
    async fn delete(&self, id: CategoryId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categoria WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }
}
