use crate::domain::{NewPerson, Person, PersonId, PersonPatch};
use crate::ports::person_repository::PersonRepository as PersonRepositoryTrait;
use crate::ports::constraints::{BOOK_PERSON_FKEY, PERSON_EMAIL_KEY};
use crate::ports::{Result, StoreError};
use async_trait::async_trait;

use super::MemoryStore;

/// PersonRepositoryのインメモリ実装
pub struct PersonRepository {
    store: MemoryStore,
}

impl PersonRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PersonRepositoryTrait for PersonRepository {
    async fn insert(&self, person: NewPerson) -> Result<Person> {
        let mut tables = self.store.lock()?;
        if tables.people.values().any(|p| p.email == person.email) {
            return Err(StoreError::UniqueViolation(PERSON_EMAIL_KEY.to_string()));
        }

        let id = tables.next_id();
        let row = Person {
            id: PersonId::new(id),
            name: person.name,
            surname: person.surname,
            alias: person.alias,
            email: person.email,
        };
        tables.people.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>> {
        Ok(self.store.lock()?.people.get(&id.value()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Person>> {
        let tables = self.store.lock()?;
        Ok(tables.people.values().find(|p| p.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<Person>> {
        Ok(self.store.lock()?.people.values().cloned().collect())
    }

    async fn update(&self, id: PersonId, patch: &PersonPatch) -> Result<Option<Person>> {
        let mut tables = self.store.lock()?;
        Ok(tables.people.get_mut(&id.value()).map(|person| {
            *person = patch.apply(person.clone());
            person.clone()
        }))
    }

    async fn delete(&self, id: PersonId) -> Result<bool> {
        let mut tables = self.store.lock()?;
        if tables.books.values().any(|b| b.person_id == Some(id)) {
            return Err(StoreError::ForeignKeyViolation(BOOK_PERSON_FKEY.to_string()));
        }
        Ok(tables.people.remove(&id.value()).is_some())
    }
}
