use crate::domain::{Book, BookId, CategoryId, NewBook, PersonId};
use crate::ports::book_repository::BookRepository as BookRepositoryTrait;
use crate::ports::constraints::{BOOK_CATEGORY_FKEY, BOOK_NAME_KEY, BOOK_PERSON_FKEY};
use crate::ports::{Result, StoreError};
use async_trait::async_trait;

use super::MemoryStore;

/// BookRepositoryのインメモリ実装
pub struct BookRepository {
    store: MemoryStore,
}

impl BookRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn insert(&self, book: NewBook) -> Result<Book> {
        let mut tables = self.store.lock()?;

        if tables.books.values().any(|b| b.name == book.name) {
            return Err(StoreError::UniqueViolation(BOOK_NAME_KEY.to_string()));
        }
        if !tables.categories.contains_key(&book.category_id.value()) {
            return Err(StoreError::ForeignKeyViolation(BOOK_CATEGORY_FKEY.to_string()));
        }
        if let Some(person_id) = book.person_id {
            if !tables.people.contains_key(&person_id.value()) {
                return Err(StoreError::ForeignKeyViolation(BOOK_PERSON_FKEY.to_string()));
            }
        }

        let id = tables.next_id();
        let row = Book {
            id: BookId::new(id),
            name: book.name,
            description: book.description,
            category_id: book.category_id,
            person_id: book.person_id,
        };
        tables.books.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        Ok(self.store.lock()?.books.get(&id.value()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Book>> {
        let tables = self.store.lock()?;
        Ok(tables.books.values().find(|b| b.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Book>> {
        Ok(self.store.lock()?.books.values().cloned().collect())
    }

    async fn update_description(&self, id: BookId, description: &str) -> Result<Option<Book>> {
        let mut tables = self.store.lock()?;
        Ok(tables.books.get_mut(&id.value()).map(|book| {
            book.description = Some(description.to_string());
            book.clone()
        }))
    }

    async fn assign_borrower(&self, id: BookId, person_id: PersonId) -> Result<bool> {
        let mut tables = self.store.lock()?;
        if !tables.people.contains_key(&person_id.value()) {
            return Err(StoreError::ForeignKeyViolation(BOOK_PERSON_FKEY.to_string()));
        }
        match tables.books.get_mut(&id.value()) {
            Some(book) if book.person_id.is_none() => {
                book.person_id = Some(person_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear_borrower(&self, id: BookId) -> Result<bool> {
        let mut tables = self.store.lock()?;
        match tables.books.get_mut(&id.value()) {
            Some(book) if book.person_id.is_some() => {
                book.person_id = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_if_on_shelf(&self, id: BookId) -> Result<bool> {
        let mut tables = self.store.lock()?;
        let on_shelf = tables
            .books
            .get(&id.value())
            .is_some_and(|book| book.person_id.is_none());
        if on_shelf {
            tables.books.remove(&id.value());
        }
        Ok(on_shelf)
    }

    async fn exists_in_category(&self, category_id: CategoryId) -> Result<bool> {
        let tables = self.store.lock()?;
        Ok(tables.books.values().any(|b| b.category_id == category_id))
    }

    async fn exists_for_borrower(&self, person_id: PersonId) -> Result<bool> {
        let tables = self.store.lock()?;
        Ok(tables.books.values().any(|b| b.person_id == Some(person_id)))
    }
}
