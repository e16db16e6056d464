use crate::application::lending::{self, LendingError, ServiceDependencies, not_found};
use crate::config::ResponseStyle;
use crate::domain::{BookId, CategoryId, PersonId, commands::ReturnBook, parse_id};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::{
    error::ApiError,
    extract::JsonBody,
    types::{
        BookResponse, CategoryResponse, CreateBookRequest, CreateCategoryRequest,
        CreatePersonRequest, LendBookRequest, MessageResponse, PersonResponse, UpdateBookRequest,
        UpdatePersonRequest,
    },
};

const DELETED: &str = "Se borro correctamente";
const RETURNED: &str = "Se realizo la devolucion correctamente";
const LENT: &str = "se presto correctamente";

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    pub response_style: ResponseStyle,
}

// ============================================================================
// Response helpers
// ============================================================================

/// 一覧レスポンスを組み立てる
///
/// Legacy: 0件は404と`[]`、1件は素のオブジェクト、2件以上は配列。
/// Uniform: 常に200と配列。
fn list_response<T: Serialize>(mut items: Vec<T>, style: ResponseStyle) -> Response {
    match (style, items.len()) {
        (ResponseStyle::Legacy, 0) => (StatusCode::NOT_FOUND, Json(items)).into_response(),
        (ResponseStyle::Legacy, 1) => {
            let item = items.remove(0);
            (StatusCode::OK, Json(item)).into_response()
        }
        _ => (StatusCode::OK, Json(items)).into_response(),
    }
}

fn message(text: &str) -> Response {
    (StatusCode::OK, Json(MessageResponse::new(text))).into_response()
}

// パスのIDが数値でない場合は、該当リソースが存在しないものとして扱う

fn book_id(raw: &str, when_missing: &'static str) -> Result<BookId, ApiError> {
    parse_id(raw)
        .map(BookId::new)
        .ok_or(ApiError(LendingError::BookNotFound(when_missing)))
}

fn category_id(raw: &str, when_missing: &'static str) -> Result<CategoryId, ApiError> {
    parse_id(raw)
        .map(CategoryId::new)
        .ok_or(ApiError(LendingError::CategoryNotFound(when_missing)))
}

fn person_id(raw: &str, when_missing: &'static str) -> Result<PersonId, ApiError> {
    parse_id(raw)
        .map(PersonId::new)
        .ok_or(ApiError(LendingError::PersonNotFound(when_missing)))
}

// ============================================================================
// Books (/libro)
// ============================================================================

/// POST /libro - 書籍を登録
///
/// 名前の重複・型不正は413、存在しないカテゴリ・人物は404。
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = req.to_command()?;
    let book = lending::create_book(&state.service_deps, cmd).await?;
    Ok(Json(BookResponse::from(book)))
}

/// GET /libro - 書籍一覧
pub async fn list_books(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let books = lending::list_books(&state.service_deps).await?;
    let body: Vec<BookResponse> = books.into_iter().map(BookResponse::from).collect();
    Ok(list_response(body, state.response_style))
}

/// GET /libro/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book_id = book_id(&id, not_found::BOOK)?;
    let book = lending::get_book(&state.service_deps, book_id).await?;
    Ok(Json(BookResponse::from(book)))
}

/// PUT /libro/:id - 書籍の説明を更新
///
/// 更新できるのは説明のみ。
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = req.to_command(book_id(&id, not_found::BOOK)?)?;
    let book = lending::update_book_description(&state.service_deps, cmd).await?;
    Ok(Json(BookResponse::from(book)))
}

/// DELETE /libro/:id - 書籍を削除
///
/// 貸出中の書籍は削除できない。
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let book_id = book_id(&id, not_found::BOOK_TO_DELETE)?;
    lending::delete_book(&state.service_deps, book_id).await?;
    Ok(message(DELETED))
}

/// PUT /libro/devolver/:id - 書籍を返却
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let cmd = ReturnBook {
        book_id: book_id(&id, not_found::BOOK_TO_RETURN)?,
    };
    lending::return_book(&state.service_deps, cmd).await?;
    Ok(message(RETURNED))
}

/// PUT /libro/prestar/:id - 書籍を貸出
///
/// 確認順：人物の存在 → 書籍の存在 → 貸出中でないこと。
pub async fn lend_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<LendBookRequest>,
) -> Result<Response, ApiError> {
    let cmd = req.to_command(book_id(&id, not_found::BOOK_TO_LEND)?)?;
    lending::lend_book(&state.service_deps, cmd).await?;
    Ok(message(LENT))
}

// ============================================================================
// Categories (/categoria)
// ============================================================================

/// POST /categoria - カテゴリを登録
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let cmd = req.to_command()?;
    let category = lending::create_category(&state.service_deps, cmd).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// GET /categoria - カテゴリ一覧
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let categories = lending::list_categories(&state.service_deps).await?;
    let body: Vec<CategoryResponse> = categories.into_iter().map(CategoryResponse::from).collect();
    Ok(list_response(body, state.response_style))
}

/// GET /categoria/:id - カテゴリをIDで取得
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category_id = category_id(&id, not_found::CATEGORY)?;
    let category = lending::get_category(&state.service_deps, category_id).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /categoria/:id - カテゴリを削除
///
/// Legacyではプレーンテキストで応答する。
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let category_id = category_id(&id, not_found::REFERENCED_CATEGORY)?;
    lending::delete_category(&state.service_deps, category_id).await?;
    match state.response_style {
        ResponseStyle::Legacy => Ok((StatusCode::OK, DELETED).into_response()),
        ResponseStyle::Uniform => Ok(message(DELETED)),
    }
}

// ============================================================================
// People (/persona)
// ============================================================================

/// POST /persona - 人物を登録
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreatePersonRequest>,
) -> Result<Json<PersonResponse>, ApiError> {
    let cmd = req.to_command()?;
    let person = lending::create_person(&state.service_deps, cmd).await?;
    Ok(Json(PersonResponse::from(person)))
}

/// GET /persona - 人物一覧
pub async fn list_people(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let people = lending::list_people(&state.service_deps).await?;
    let body: Vec<PersonResponse> = people.into_iter().map(PersonResponse::from).collect();
    Ok(list_response(body, state.response_style))
}

/// GET /persona/:id - 人物をIDで取得
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PersonResponse>, ApiError> {
    let person_id = person_id(&id, not_found::PERSON)?;
    let person = lending::get_person(&state.service_deps, person_id).await?;
    Ok(Json(PersonResponse::from(person)))
}

/// PUT /persona/:id - 人物を部分更新
///
/// メールアドレスは変更できない（同じ値の指定は可）。
/// 人物の存在確認は更新内容の検証より先に行う。
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdatePersonRequest>,
) -> Result<Json<PersonResponse>, ApiError> {
    let person_id = person_id(&id, not_found::PERSON_TO_UPDATE)?;
    lending::find_person_to_update(&state.service_deps, person_id).await?;
    let cmd = req.to_command(person_id)?;
    let person = lending::update_person(&state.service_deps, cmd).await?;
    Ok(Json(PersonResponse::from(person)))
}

/// DELETE /persona/:id - 人物を削除
///
/// 書籍を借りている人物は削除できない。
pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let person_id = person_id(&id, not_found::PERSON)?;
    lending::delete_person(&state.service_deps, person_id).await?;
    Ok(message(DELETED))
}
