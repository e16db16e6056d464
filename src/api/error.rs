use crate::application::lending::{ErrorKind, LendingError};
use crate::domain::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::MessageResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(pub LendingError);

impl From<LendingError> for ApiError {
    fn from(err: LendingError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(LendingError::Validation(err))
    }
}

impl ApiError {
    /// エラー分類に対応するHTTPステータス
    ///
    /// 存在しないリソースのみ404。それ以外（入力エラー・競合・禁止操作・
    /// ストアの障害）はすべて「処理できないリクエスト」として413にまとめる。
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation
            | ErrorKind::Conflict
            | ErrorKind::Forbidden
            | ErrorKind::Store => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LendingError::Store(e) => {
                tracing::error!(error = ?e, "Store error");
                "Error inesperado".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
