pub mod book_repository;
pub mod category_repository;
pub mod person_repository;
pub mod store_error;

pub use book_repository::*;
pub use category_repository::*;
pub use person_repository::*;
pub use store_error::{Result, StoreError, constraints};
