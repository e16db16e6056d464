//! In-process store used by tests and by the `memory` backend.
//!
//! All three repositories share one table set so that the unique and
//! foreign-key rules of the PostgreSQL schema hold across entities.

pub mod book_repository;
pub mod category_repository;
pub mod person_repository;

use crate::domain::{Book, Category, Person};
use crate::ports::{Result, StoreError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub use book_repository::BookRepository;
pub use category_repository::CategoryRepository;
pub use person_repository::PersonRepository;

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub books: BTreeMap<i64, Book>,
    pub categories: BTreeMap<i64, Category>,
    pub people: BTreeMap<i64, Person>,
    last_id: i64,
}

impl Tables {
    /// 連番を払い出す（全テーブル共通）
    pub fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// 共有テーブルへのハンドル
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> Arc<BookRepository> {
        Arc::new(BookRepository::new(self.clone()))
    }

    pub fn categories(&self) -> Arc<CategoryRepository> {
        Arc::new(CategoryRepository::new(self.clone()))
    }

    pub fn people(&self) -> Arc<PersonRepository> {
        Arc::new(PersonRepository::new(self.clone()))
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
}
