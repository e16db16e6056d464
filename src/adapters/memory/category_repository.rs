use crate::domain::{Category, CategoryId};
use crate::ports::category_repository::CategoryRepository as CategoryRepositoryTrait;
use crate::ports::constraints::{BOOK_CATEGORY_FKEY, CATEGORY_NAME_KEY};
use crate::ports::{Result, StoreError};
use async_trait::async_trait;

use super::MemoryStore;

/// CategoryRepositoryのインメモリ実装
pub struct CategoryRepository {
    store: MemoryStore,
}

impl CategoryRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn insert(&self, name: &str) -> Result<Category> {
        let mut tables = self.store.lock()?;
        if tables.categories.values().any(|c| c.name == name) {
            return Err(StoreError::UniqueViolation(CATEGORY_NAME_KEY.to_string()));
        }

        let id = tables.next_id();
        let row = Category {
            id: CategoryId::new(id),
            name: name.to_string(),
        };
        tables.categories.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.store.lock()?.categories.get(&id.value()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let tables = self.store.lock()?;
        Ok(tables.categories.values().find(|c| c.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.store.lock()?.categories.values().cloned().collect())
    }

    async fn delete(&self, id: CategoryId) -> Result<bool> {
        let mut tables = self.store.lock()?;
        if tables.books.values().any(|b| b.category_id == id) {
            return Err(StoreError::ForeignKeyViolation(BOOK_CATEGORY_FKEY.to_string()));
        }
        Ok(tables.categories.remove(&id.value()).is_some())
    }
}
