use crate::domain::{Book, BookId, CategoryId, NewBook, PersonId};
use async_trait::async_trait;

use super::Result;

/// 書籍リポジトリポート
///
/// 貸出状態に依存する書き込みは条件付きで実行され、
/// 条件を満たさなかった場合は`false`を返す。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 書籍を登録し、採番後の行を返す
    ///
    /// 名前の重複・存在しないカテゴリや人物は制約違反として返る。
    async fn insert(&self, book: NewBook) -> Result<Book>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>>;

    /// 正規化済みの名前で検索する
    async fn find_by_name(&self, name: &str) -> Result<Option<Book>>;

    /// 全書籍をID順に返す
    async fn list(&self) -> Result<Vec<Book>>;

    /// 説明を更新する。存在しない場合は`None`
    async fn update_description(&self, id: BookId, description: &str) -> Result<Option<Book>>;

    /// 棚にある場合のみ借り手を設定する
    async fn assign_borrower(&self, id: BookId, person_id: PersonId) -> Result<bool>;

    /// 貸出中の場合のみ借り手を外す
    async fn clear_borrower(&self, id: BookId) -> Result<bool>;

    /// 棚にある場合のみ削除する
    async fn delete_if_on_shelf(&self, id: BookId) -> Result<bool>;

    /// カテゴリを参照する書籍があるか
    async fn exists_in_category(&self, category_id: CategoryId) -> Result<bool>;

    /// 人物が借りている書籍があるか
    async fn exists_for_borrower(&self, person_id: PersonId) -> Result<bool>;
}
