mod book_service;
mod category_service;
mod errors;
mod person_service;

use crate::ports::{BookRepository, CategoryRepository, PersonRepository};
use std::sync::Arc;

pub use book_service::{
    create_book, delete_book, get_book, lend_book, list_books, return_book,
    update_book_description,
};
pub use category_service::{create_category, delete_category, get_category, list_categories};
pub use errors::{ErrorKind, LendingError, Result, not_found};
pub use person_service::{
    create_person, delete_person, find_person_to_update, get_person, list_people, update_person,
};

/// サービスの依存関係
///
/// 振る舞いは持たず、各操作関数に明示的に渡される。
/// ストアの実装（PostgreSQL・インメモリ）はここで差し替える。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub books: Arc<dyn BookRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub people: Arc<dyn PersonRepository>,
}
