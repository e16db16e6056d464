pub mod book_repository;
pub mod category_repository;
pub mod person_repository;

use crate::ports::StoreError;
use sqlx::error::ErrorKind;

// パブリックに型を再エクスポート
pub use book_repository::BookRepository as PostgresBookRepository;
pub use category_repository::CategoryRepository as PostgresCategoryRepository;
pub use person_repository::PersonRepository as PostgresPersonRepository;

/// Translate a sqlx error into a store error, surfacing constraint violations
/// so the application layer can report them as conflicts.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or_default().to_string();
        match db_err.kind() {
            ErrorKind::UniqueViolation => return StoreError::UniqueViolation(constraint),
            ErrorKind::ForeignKeyViolation => return StoreError::ForeignKeyViolation(constraint),
            _ => {}
        }
    }
    StoreError::Backend(Box::new(err))
}
