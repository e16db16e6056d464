use crate::domain::{Category, CategoryId, commands::CreateCategory};
use crate::ports::StoreError;

use super::ServiceDependencies;
use super::errors::{LendingError, Result, not_found};

/// カテゴリを登録する
///
/// 正規化後の名前が既存のカテゴリと重複する場合は失敗する。
pub async fn create_category(deps: &ServiceDependencies, cmd: CreateCategory) -> Result<Category> {
    let existing = deps
        .categories
        .find_by_name(&cmd.name)
        .await
        .map_err(LendingError::Store)?;
    if existing.is_some() {
        return Err(LendingError::DuplicateCategoryName);
    }

    let category = deps
        .categories
        .insert(&cmd.name)
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation(_) => LendingError::DuplicateCategoryName,
            other => LendingError::Store(other),
        })?;

    tracing::info!(category_id = category.id.value(), "category created");
    Ok(category)
}

pub async fn get_category(deps: &ServiceDependencies, category_id: CategoryId) -> Result<Category> {
    deps.categories
        .find_by_id(category_id)
        .await
        .map_err(LendingError::Store)?
        .ok_or(LendingError::CategoryNotFound(not_found::CATEGORY))
}

pub async fn list_categories(deps: &ServiceDependencies) -> Result<Vec<Category>> {
    deps.categories.list().await.map_err(LendingError::Store)
}

/// カテゴリを削除する
///
/// ビジネスルール（確認順）：
/// - カテゴリを参照する書籍がないこと
/// - カテゴリが存在すること
pub async fn delete_category(deps: &ServiceDependencies, category_id: CategoryId) -> Result<()> {
    let has_books = deps
        .books
        .exists_in_category(category_id)
        .await
        .map_err(LendingError::Store)?;
    if has_books {
        return Err(LendingError::CategoryHasBooks);
    }

    let deleted = deps
        .categories
        .delete(category_id)
        .await
        .map_err(|e| match e {
            StoreError::ForeignKeyViolation(_) => LendingError::CategoryHasBooks,
            other => LendingError::Store(other),
        })?;
    if !deleted {
        return Err(LendingError::CategoryNotFound(
            not_found::REFERENCED_CATEGORY,
        ));
    }

    tracing::info!(category_id = category_id.value(), "category deleted");
    Ok(())
}
