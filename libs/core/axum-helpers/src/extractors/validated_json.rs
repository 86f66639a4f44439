//! JSON extractor with validation via the `validator` crate.

use crate::errors::{AppError, ErrorCode, error_response, validation_details};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs `Validate::validate` on the decoded body.
///
/// Malformed JSON is answered by [`AppError::JsonExtractorRejection`]; a body
/// that decodes but fails validation gets 400 with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct RegisterUser {
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn register(ValidatedJson(payload): ValidatedJson<RegisterUser>) -> String {
///     payload.email
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::JsonExtractorRejection(e).into_response())?;

        data.validate().map_err(|e| {
            tracing::info!(
                error_code = ErrorCode::ValidationError.code(),
                "Request body failed validation"
            );
            error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message(),
                Some(validation_details(&e)),
            )
        })?;

        Ok(ValidatedJson(data))
    }
}
