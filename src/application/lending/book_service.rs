use crate::domain::{self, Book, BookId, LoanError, NewBook, commands::*};
use crate::ports::{StoreError, constraints};

use super::ServiceDependencies;
use super::errors::{LendingError, Result, not_found};

/// 書籍登録時のストアエラーを業務エラーに変換する
///
/// 事前確認とINSERTの間に他のリクエストが割り込んだ場合、
/// ストアの制約違反として検出される。
fn map_insert_error(err: StoreError) -> LendingError {
    match err {
        StoreError::UniqueViolation(_) => LendingError::DuplicateBookName,
        StoreError::ForeignKeyViolation(c) if c == constraints::BOOK_PERSON_FKEY => {
            LendingError::PersonNotFound(not_found::REFERENCED_PERSON)
        }
        StoreError::ForeignKeyViolation(_) => {
            LendingError::CategoryNotFound(not_found::REFERENCED_CATEGORY)
        }
        other => LendingError::Store(other),
    }
}

/// 条件付き書き込みが空振りした後、現在の状態から失敗理由を決める
async fn explain_lost_race(
    deps: &ServiceDependencies,
    book_id: BookId,
    when_present: LoanError,
    when_gone: &'static str,
) -> LendingError {
    match deps.books.find_by_id(book_id).await {
        Ok(Some(_)) => LendingError::Loan(when_present),
        Ok(None) => LendingError::BookNotFound(when_gone),
        Err(e) => LendingError::Store(e),
    }
}

async fn load_book(
    deps: &ServiceDependencies,
    book_id: BookId,
    when_missing: &'static str,
) -> Result<Book> {
    deps.books
        .find_by_id(book_id)
        .await
        .map_err(LendingError::Store)?
        .ok_or(LendingError::BookNotFound(when_missing))
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - 正規化後の名前が既存の書籍と重複しないこと
/// - 借り手が指定された場合、その人物が存在すること
/// - カテゴリが存在すること
pub async fn create_book(deps: &ServiceDependencies, cmd: CreateBook) -> Result<Book> {
    // 1. 名前の重複確認
    let existing = deps
        .books
        .find_by_name(&cmd.name)
        .await
        .map_err(LendingError::Store)?;
    if existing.is_some() {
        return Err(LendingError::DuplicateBookName);
    }

    // 2. 借り手の存在確認（指定時のみ）
    if let Some(person_id) = cmd.person_id {
        let person = deps
            .people
            .find_by_id(person_id)
            .await
            .map_err(LendingError::Store)?;
        if person.is_none() {
            return Err(LendingError::PersonNotFound(not_found::REFERENCED_PERSON));
        }
    }

    // 3. カテゴリの存在確認
    let category = deps
        .categories
        .find_by_id(cmd.category_id)
        .await
        .map_err(LendingError::Store)?;
    if category.is_none() {
        return Err(LendingError::CategoryNotFound(
            not_found::REFERENCED_CATEGORY,
        ));
    }

    // 4. 登録
    let book = deps
        .books
        .insert(NewBook {
            name: cmd.name,
            description: cmd.description,
            category_id: cmd.category_id,
            person_id: cmd.person_id,
        })
        .await
        .map_err(map_insert_error)?;

    tracing::info!(book_id = book.id.value(), "book created");
    Ok(book)
}

/// IDで書籍を取得する
pub async fn get_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    load_book(deps, book_id, not_found::BOOK).await
}

/// 全書籍を取得する
pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.books.list().await.map_err(LendingError::Store)
}

/// 書籍の説明を更新する
///
/// 説明以外の項目は変更できない。
pub async fn update_book_description(
    deps: &ServiceDependencies,
    cmd: UpdateBookDescription,
) -> Result<Book> {
    let book = deps
        .books
        .update_description(cmd.book_id, &cmd.description)
        .await
        .map_err(LendingError::Store)?
        .ok_or(LendingError::BookNotFound(not_found::BOOK))?;

    tracing::info!(book_id = book.id.value(), "book description updated");
    Ok(book)
}

/// 書籍を削除する
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 貸出中でないこと
pub async fn delete_book(deps: &ServiceDependencies, book_id: BookId) -> Result<()> {
    let book = load_book(deps, book_id, not_found::BOOK_TO_DELETE).await?;
    domain::book::ensure_removable(&book)?;

    let deleted = deps
        .books
        .delete_if_on_shelf(book_id)
        .await
        .map_err(LendingError::Store)?;
    if !deleted {
        return Err(explain_lost_race(deps, book_id, LoanError::OnLoan, not_found::BOOK_TO_DELETE).await);
    }

    tracing::info!(book_id = book_id.value(), "book deleted");
    Ok(())
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 貸出中であること
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<()> {
    let book = load_book(deps, cmd.book_id, not_found::BOOK_TO_RETURN).await?;
    domain::book::return_book(book)?;

    let cleared = deps
        .books
        .clear_borrower(cmd.book_id)
        .await
        .map_err(LendingError::Store)?;
    if !cleared {
        return Err(explain_lost_race(
            deps,
            cmd.book_id,
            LoanError::NotLoaned,
            not_found::BOOK_TO_RETURN,
        )
        .await);
    }

    tracing::info!(book_id = cmd.book_id.value(), "book returned");
    Ok(())
}

/// 書籍を貸し出す
///
/// ビジネスルール（確認順）：
/// - 借り手の人物が存在すること
/// - 書籍が存在すること
/// - 書籍が棚にあること（貸出中でないこと）
pub async fn lend_book(deps: &ServiceDependencies, cmd: LendBook) -> Result<()> {
    // 1. 借り手の存在確認
    let person = deps
        .people
        .find_by_id(cmd.person_id)
        .await
        .map_err(LendingError::Store)?;
    if person.is_none() {
        return Err(LendingError::PersonNotFound(not_found::BORROWER));
    }

    // 2. 書籍の存在確認と状態遷移
    let book = load_book(deps, cmd.book_id, not_found::BOOK_TO_LEND).await?;
    domain::book::lend(book, cmd.person_id)?;

    // 3. 棚にある場合のみ借り手を設定
    let assigned = deps
        .books
        .assign_borrower(cmd.book_id, cmd.person_id)
        .await
        .map_err(|e| match e {
            StoreError::ForeignKeyViolation(_) => {
                LendingError::PersonNotFound(not_found::BORROWER)
            }
            other => LendingError::Store(other),
        })?;
    if !assigned {
        return Err(explain_lost_race(
            deps,
            cmd.book_id,
            LoanError::AlreadyLoaned,
            not_found::BOOK_TO_LEND,
        )
        .await);
    }

    tracing::info!(
        book_id = cmd.book_id.value(),
        person_id = cmd.person_id.value(),
        "book lent"
    );
    Ok(())
}
