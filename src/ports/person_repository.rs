use crate::domain::{NewPerson, Person, PersonId, PersonPatch};
use async_trait::async_trait;

use super::Result;

/// 人物リポジトリポート
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// 人物を登録し、採番後の行を返す
    async fn insert(&self, person: NewPerson) -> Result<Person>;

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Person>>;

    async fn list(&self) -> Result<Vec<Person>>;

    /// パッチに含まれる列だけを更新する。存在しない場合は`None`
    async fn update(&self, id: PersonId, patch: &PersonPatch) -> Result<Option<Person>>;

    /// 削除する。存在しなかった場合は`false`
    ///
    /// 書籍の借り手として参照されている場合は外部キー制約違反になる。
    async fn delete(&self, id: PersonId) -> Result<bool>;
}
