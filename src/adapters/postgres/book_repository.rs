use crate::domain::{Book, BookId, CategoryId, NewBook, PersonId};
use crate::ports::book_repository::BookRepository as BookRepositoryTrait;
use crate::ports::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::map_sqlx_error;

/// Map a `libro` row to a Book
fn map_row_to_book(row: &PgRow) -> Book {
    let person_id: Option<i64> = row.get("persona_id");
    Book {
        id: BookId::new(row.get("id")),
        name: row.get("nombre"),
        description: row.get("descripcion"),
        category_id: CategoryId::new(row.get("categoria_id")),
        person_id: person_id.map(PersonId::new),
    }
}

/// PostgreSQL implementation of BookRepository
///
/// Loan transitions and deletes are single conditional statements, so the
/// loan state checked by the caller cannot change between check and write.
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn insert(&self, book: NewBook) -> Result<Book> {
        let row = sqlx::query(
            r#"
            INSERT INTO libro (nombre, descripcion, categoria_id, persona_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nombre, descripcion, categoria_id, persona_id
            "#,
        )
        .bind(&book.name)
        .bind(&book.description)
        .bind(book.category_id.value())
        .bind(book.person_id.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(map_row_to_book(&row))
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            "SELECT id, nombre, descripcion, categoria_id, persona_id FROM libro WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_book))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Book>> {
        let row = sqlx::query(
            "SELECT id, nombre, descripcion, categoria_id, persona_id FROM libro WHERE nombre = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_book))
    }

    async fn list(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            "SELECT id, nombre, descripcion, categoria_id, persona_id FROM libro ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(map_row_to_book).collect())
    }

    async fn update_description(&self, id: BookId, description: &str) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            UPDATE libro SET descripcion = $1
            WHERE id = $2
            RETURNING id, nombre, descripcion, categoria_id, persona_id
            "#,
        )
        .bind(description)
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_book))
    }

    async fn assign_borrower(&self, id: BookId, person_id: PersonId) -> Result<bool> {
        let result =
            sqlx::query("UPDATE libro SET persona_id = $1 WHERE id = $2 AND persona_id IS NULL")
                .bind(person_id.value())
                .bind(id.value())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear_borrower(&self, id: BookId) -> Result<bool> {
        let result =
            sqlx::query("UPDATE libro SET persona_id = NULL WHERE id = $1 AND persona_id IS NOT NULL")
                .bind(id.value())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_if_on_shelf(&self, id: BookId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM libro WHERE id = $1 AND persona_id IS NULL")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn exists_in_category(&self, category_id: CategoryId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM libro WHERE categoria_id = $1)")
                .bind(category_id.value())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    async fn exists_for_borrower(&self, person_id: PersonId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM libro WHERE persona_id = $1)")
                .bind(person_id.value())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(exists)
    }
}
