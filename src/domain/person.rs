use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{PersonId, PersonUpdateError};

/// 人物エンティティ
///
/// `email`は一意で、登録後は変更不可。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub surname: String,
    pub alias: String,
    pub email: String,
}

/// 採番前の人物
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub surname: String,
    pub alias: String,
    pub email: String,
}

/// 更新可能な項目
///
/// `email`は含まない。宣言順がSET句の列順になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PersonField {
    Name,
    Surname,
    Alias,
}

impl PersonField {
    /// ストア上の列名
    pub fn column(&self) -> &'static str {
        match self {
            PersonField::Name => "nombre",
            PersonField::Surname => "apellido",
            PersonField::Alias => "alias",
        }
    }
}

/// 人物の部分更新
///
/// 項目から新しい値への写像。指定された項目だけが書き換えられる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    changes: BTreeMap<PersonField, String>,
}

impl PersonPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: PersonField, value: impl Into<String>) {
        self.changes.insert(field, value.into());
    }

    /// `Some`の場合のみ項目を設定する
    pub fn set_opt(&mut self, field: PersonField, value: Option<String>) {
        if let Some(value) = value {
            self.set(field, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// 変更を列順に列挙する
    pub fn changes(&self) -> impl Iterator<Item = (PersonField, &str)> {
        self.changes.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn apply(&self, mut person: Person) -> Person {
        for (field, value) in self.changes() {
            let slot = match field {
                PersonField::Name => &mut person.name,
                PersonField::Surname => &mut person.surname,
                PersonField::Alias => &mut person.alias,
            };
            *slot = value.to_string();
        }
        person
    }
}

/// メールアドレスの変更要求でないことを確認する
///
/// 未指定、または現在と同じ値であれば許可する。
pub fn ensure_email_unchanged(
    current: &Person,
    requested: Option<&str>,
) -> Result<(), PersonUpdateError> {
    match requested {
        Some(email) if email != current.email => Err(PersonUpdateError::EmailImmutable),
        _ => Ok(()),
    }
}
