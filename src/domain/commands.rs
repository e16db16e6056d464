use super::{BookId, CategoryId, PersonId, PersonPatch};

/// コマンド：書籍を登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBook {
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub person_id: Option<PersonId>,
}

/// コマンド：書籍の説明を更新する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBookDescription {
    pub book_id: BookId,
    pub description: String,
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LendBook {
    pub book_id: BookId,
    pub person_id: PersonId,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnBook {
    pub book_id: BookId,
}

/// コマンド：カテゴリを登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategory {
    pub name: String,
}

/// コマンド：人物を登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePerson {
    pub name: String,
    pub surname: String,
    pub alias: String,
    pub email: String,
}

/// コマンド：人物を部分更新する
///
/// `email`は変更不可の確認にのみ使われ、書き込まれない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePerson {
    pub person_id: PersonId,
    pub patch: PersonPatch,
    pub email: Option<String>,
}
