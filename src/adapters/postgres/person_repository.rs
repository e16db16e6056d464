use crate::domain::{NewPerson, Person, PersonId, PersonPatch};
use crate::ports::person_repository::PersonRepository as PersonRepositoryTrait;
use crate::ports::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

use super::map_sqlx_error;

fn map_row_to_person(row: &PgRow) -> Person {
    Person {
        id: PersonId::new(row.get("id")),
        name: row.get("nombre"),
        surname: row.get("apellido"),
        alias: row.get("alias"),
        email: row.get("email"),
    }
}

/// PostgreSQL implementation of PersonRepository
pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonRepositoryTrait for PersonRepository {
    async fn insert(&self, person: NewPerson) -> Result<Person> {
        let row = sqlx::query(
            r#"
            INSERT INTO persona (nombre, apellido, alias, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nombre, apellido, alias, email
            "#,
        )
        .bind(&person.name)
        .bind(&person.surname)
        .bind(&person.alias)
        .bind(&person.email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(map_row_to_person(&row))
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>> {
        let row = sqlx::query("SELECT id, nombre, apellido, alias, email FROM persona WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_person))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Person>> {
        let row =
            sqlx::query("SELECT id, nombre, apellido, alias, email FROM persona WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_person))
    }

    async fn list(&self) -> Result<Vec<Person>> {
        let rows = sqlx::query("SELECT id, nombre, apellido, alias, email FROM persona ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(map_row_to_person).collect())
    }

    /// Apply a patch as a single parameterized UPDATE
    ///
    /// Columns appear in the patch's field order; `email` is never part of the SET list.
    async fn update(&self, id: PersonId, patch: &PersonPatch) -> Result<Option<Person>> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE persona SET ");
        let mut assignments = builder.separated(", ");
        for (field, value) in patch.changes() {
            assignments.push(field.column());
            assignments.push_unseparated(" = ");
            assignments.push_bind_unseparated(value.to_string());
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id.value())
            .push(" RETURNING id, nombre, apellido, alias, email");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_person))
    }

    async fn delete(&self, id: PersonId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM persona WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }
}
