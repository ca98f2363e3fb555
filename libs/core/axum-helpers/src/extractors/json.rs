//! JSON extractor that reports failures through the error envelope.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// JSON body extractor.
///
/// Behaves like [`axum::Json`] but converts extraction failures (missing
/// content type, malformed body, mismatched fields) into the structured
/// [`ErrorResponse`](crate::errors::ErrorResponse) envelope instead of
/// axum's plain-text rejection.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::AppJson;
///
/// async fn create_user(AppJson(payload): AppJson<CreateUser>) -> String {
///     format!("Creating user: {}", payload.username)
/// }
/// ```
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(data)) => Ok(AppJson(data)),
            Err(rejection) => Err(AppError::JsonExtractorRejection(rejection).into_response()),
        }
    }
}
