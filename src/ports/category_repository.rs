use crate::domain::{Category, CategoryId};
use async_trait::async_trait;

use super::Result;

/// カテゴリリポジトリポート
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// カテゴリを登録し、採番後の行を返す
    async fn insert(&self, name: &str) -> Result<Category>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    async fn list(&self) -> Result<Vec<Category>>;

    /// 削除する。存在しなかった場合は`false`
    ///
    /// 書籍から参照されている場合は外部キー制約違反になる。
    async fn delete(&self, id: CategoryId) -> Result<bool>;
}
