use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{
    Book, BookId, Category, CategoryId, Person, PersonField, PersonId, PersonPatch,
    ValidationError, commands::*, validation,
};

// ============================================================================
// Requests
// ============================================================================
//
// 各項目は型を問わず受け取り、`to_command`でバリデーションする。
// 型違いをJSONの拒否ではなく業務上の入力エラーとして返すため。

/// 書籍登録リクエスト（POST /libro）
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookRequest {
    #[serde(rename = "nombre")]
    pub name: Option<Value>,
    #[serde(rename = "descripcion")]
    pub description: Option<Value>,
    pub categoria_id: Option<Value>,
    pub persona_id: Option<Value>,
}

impl CreateBookRequest {
    pub fn to_command(&self) -> Result<CreateBook, ValidationError> {
        let name = validation::required_text("nombre", self.name.as_ref());
        let category_id = validation::required_id("categoria_id", self.categoria_id.as_ref());
        // 欠落は型エラーより優先する
        if matches!(name, Err(ValidationError::Missing(_)))
            || matches!(category_id, Err(ValidationError::Missing(_)))
        {
            return Err(ValidationError::NameAndCategoryRequired);
        }
        let (name, category_id) = (name?, category_id?);
        let description = validation::optional_text("descripcion", self.description.as_ref())?;
        let person_id = validation::optional_id("persona_id", self.persona_id.as_ref())?;

        Ok(CreateBook {
            name,
            description,
            category_id: CategoryId::new(category_id),
            person_id: person_id.map(PersonId::new),
        })
    }
}

/// 書籍説明更新リクエスト（PUT /libro/:id）
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(rename = "descripcion")]
    pub description: Option<Value>,
}

impl UpdateBookRequest {
    pub fn to_command(&self, book_id: BookId) -> Result<UpdateBookDescription, ValidationError> {
        let description = validation::required_text("descripcion", self.description.as_ref())?;
        Ok(UpdateBookDescription {
            book_id,
            description,
        })
    }
}

/// 貸出リクエスト（PUT /libro/prestar/:id）
#[derive(Debug, Default, Deserialize)]
pub struct LendBookRequest {
    pub persona_id: Option<Value>,
}

impl LendBookRequest {
    pub fn to_command(&self, book_id: BookId) -> Result<LendBook, ValidationError> {
        let person_id = validation::required_id("persona_id", self.persona_id.as_ref())?;
        Ok(LendBook {
            book_id,
            person_id: PersonId::new(person_id),
        })
    }
}

/// カテゴリ登録リクエスト（POST /categoria）
#[derive(Debug, Default, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(rename = "nombre")]
    pub name: Option<Value>,
}

impl CreateCategoryRequest {
    pub fn to_command(&self) -> Result<CreateCategory, ValidationError> {
        let name = validation::required_text("nombre", self.name.as_ref())?;
        Ok(CreateCategory { name })
    }
}

/// 人物登録リクエスト（POST /persona）
#[derive(Debug, Default, Deserialize)]
pub struct CreatePersonRequest {
    #[serde(rename = "nombre")]
    pub name: Option<Value>,
    #[serde(rename = "apellido")]
    pub surname: Option<Value>,
    pub alias: Option<Value>,
    pub email: Option<Value>,
}

impl CreatePersonRequest {
    pub fn to_command(&self) -> Result<CreatePerson, ValidationError> {
        Ok(CreatePerson {
            name: validation::required_text("nombre", self.name.as_ref())?,
            surname: validation::required_text("apellido", self.surname.as_ref())?,
            alias: validation::required_text("alias", self.alias.as_ref())?,
            email: validation::required_text("email", self.email.as_ref())?,
        })
    }
}

/// 人物部分更新リクエスト（PUT /persona/:id）
///
/// 指定された項目は登録時と同じ規則で検証される。
/// 明示的な`null`は「未指定」ではなく`Some(Value::Null)`として保持し、エラーにする。
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePersonRequest {
    #[serde(rename = "nombre", default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(rename = "apellido", default, deserialize_with = "present")]
    pub surname: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub alias: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Value>,
}

/// キーが存在する項目は値が`null`でも`Some`にする（キーがなければ`default`で`None`）
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl UpdatePersonRequest {
    pub fn to_command(&self, person_id: PersonId) -> Result<UpdatePerson, ValidationError> {
        let mut patch = PersonPatch::new();
        patch.set_opt(
            PersonField::Name,
            validation::patch_text("nombre", self.name.as_ref())?,
        );
        patch.set_opt(
            PersonField::Surname,
            validation::patch_text("apellido", self.surname.as_ref())?,
        );
        patch.set_opt(
            PersonField::Alias,
            validation::patch_text("alias", self.alias.as_ref())?,
        );
        let email = validation::patch_text("email", self.email.as_ref())?;

        Ok(UpdatePerson {
            person_id,
            patch,
            email,
        })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// 書籍レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    pub categoria_id: i64,
    pub persona_id: Option<i64>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.value(),
            name: book.name,
            description: book.description,
            categoria_id: book.category_id.value(),
            persona_id: book.person_id.map(|id| id.value()),
        }
    }
}

/// カテゴリレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.value(),
            name: category.name,
        }
    }
}

/// 人物レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonResponse {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    pub alias: String,
    pub email: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id.value(),
            name: person.name,
            surname: person.surname,
            alias: person.alias,
            email: person.email,
        }
    }
}

/// メッセージのみのレスポンス（成功時の確認・エラー共通）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub mensaje: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            mensaje: message.into(),
        }
    }
}
