use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::domain::ValidationError;

/// JSON body extractor whose rejection is a validation error
///
/// Malformed JSON, a missing content type or a non-object body all answer with
/// the regular `{"mensaje": ...}` error body instead of axum's plain-text rejection.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "Rejected request body");
                Err(ApiError::from(ValidationError::MalformedBody))
            }
        }
    }
}
