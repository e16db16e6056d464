use crate::domain::{self, NewPerson, Person, PersonId, commands::*};
use crate::ports::StoreError;

use super::ServiceDependencies;
use super::errors::{LendingError, Result, not_found};

/// 人物を登録する
///
/// メールアドレスが登録済みの場合は失敗する。
pub async fn create_person(deps: &ServiceDependencies, cmd: CreatePerson) -> Result<Person> {
    let existing = deps
        .people
        .find_by_email(&cmd.email)
        .await
        .map_err(LendingError::Store)?;
    if existing.is_some() {
        return Err(LendingError::DuplicateEmail);
    }

    let person = deps
        .people
        .insert(NewPerson {
            name: cmd.name,
            surname: cmd.surname,
            alias: cmd.alias,
            email: cmd.email,
        })
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation(_) => LendingError::DuplicateEmail,
            other => LendingError::Store(other),
        })?;

    tracing::info!(person_id = person.id.value(), "person created");
    Ok(person)
}

async fn load_person(
    deps: &ServiceDependencies,
    person_id: PersonId,
    when_missing: &'static str,
) -> Result<Person> {
    deps.people
        .find_by_id(person_id)
        .await
        .map_err(LendingError::Store)?
        .ok_or(LendingError::PersonNotFound(when_missing))
}

pub async fn get_person(deps: &ServiceDependencies, person_id: PersonId) -> Result<Person> {
    load_person(deps, person_id, not_found::PERSON).await
}

/// 更新対象の人物を取得する
///
/// 更新内容の検証より先に存在を確認する場合に使う。
pub async fn find_person_to_update(
    deps: &ServiceDependencies,
    person_id: PersonId,
) -> Result<Person> {
    load_person(deps, person_id, not_found::PERSON_TO_UPDATE).await
}

pub async fn list_people(deps: &ServiceDependencies) -> Result<Vec<Person>> {
    deps.people.list().await.map_err(LendingError::Store)
}

/// 人物を部分更新する
///
/// ビジネスルール：
/// - 人物が存在すること
/// - メールアドレスを変更しようとしていないこと（同じ値の指定は可）
///
/// 書き込まれるのは名前・姓・別名のみ。
pub async fn update_person(deps: &ServiceDependencies, cmd: UpdatePerson) -> Result<Person> {
    let current = find_person_to_update(deps, cmd.person_id).await?;
    domain::person::ensure_email_unchanged(&current, cmd.email.as_deref())?;

    if cmd.patch.is_empty() {
        return Ok(current);
    }

    let person = deps
        .people
        .update(cmd.person_id, &cmd.patch)
        .await
        .map_err(LendingError::Store)?
        .ok_or(LendingError::PersonNotFound(not_found::PERSON_TO_UPDATE))?;

    tracing::info!(person_id = person.id.value(), "person updated");
    Ok(person)
}

/// 人物を削除する
///
/// ビジネスルール（確認順）：
/// - 人物が存在すること
/// - 人物が借りている書籍がないこと
pub async fn delete_person(deps: &ServiceDependencies, person_id: PersonId) -> Result<()> {
    get_person(deps, person_id).await?;

    let has_loans = deps
        .books
        .exists_for_borrower(person_id)
        .await
        .map_err(LendingError::Store)?;
    if has_loans {
        return Err(LendingError::PersonHasLoans);
    }

    let deleted = deps
        .people
        .delete(person_id)
        .await
        .map_err(|e| match e {
            StoreError::ForeignKeyViolation(_) => LendingError::PersonHasLoans,
            other => LendingError::Store(other),
        })?;
    if !deleted {
        return Err(LendingError::PersonNotFound(not_found::PERSON));
    }

    tracing::info!(person_id = person_id.value(), "person deleted");
    Ok(())
}
