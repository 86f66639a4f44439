use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Weak password: {0}")]
    WeakPassword(String),

    /// A multi-row write failed after its first insert and was rolled back.
    #[error("Account creation rolled back: {0}")]
    Consistency(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type AccountResult<T> = Result<T, AccountError>;

impl AccountError {
    /// Short label used for rejection metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AccountError::Invalid(_) => "invalid_input",
            AccountError::DuplicateEmail(_) => "duplicate_email",
            AccountError::WeakPassword(_) => "weak_password",
            AccountError::Consistency(_) => "rolled_back",
            AccountError::PasswordHash(_) => "password_hash",
            AccountError::Database(_) => "database",
        }
    }
}

fn field_error(field: &'static str, code: &'static str, message: String) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(
        field,
        ValidationError::new(code).with_message(Cow::Owned(message)),
    );
    errors
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Invalid(errors) => AppError::ValidationError(errors),
            AccountError::DuplicateEmail(_) => AppError::ValidationError(field_error(
                "email",
                "unique",
                "A user with this email already exists".to_string(),
            )),
            AccountError::WeakPassword(msg) => {
                AppError::ValidationError(field_error("password", "password_policy", msg))
            }
            AccountError::Consistency(msg) => AppError::Consistency(msg),
            AccountError::PasswordHash(msg) => AppError::InternalServerError(msg),
            AccountError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use sea_orm::{ConnAcquireErr, DbErr, RuntimeErr};

    #[test]
    fn test_duplicate_email_becomes_email_field_error() {
        let app: AppError = AccountError::DuplicateEmail("a@x.com".into()).into();
        let AppError::ValidationError(errors) = app else {
            panic!("expected validation error");
        };

        let fields = errors.field_errors();
        let email = fields.get("email").expect("email entry");
        assert_eq!(email[0].code, "unique");
    }

    #[test]
    fn test_weak_password_keeps_policy_message() {
        let app: AppError = AccountError::WeakPassword("needs a digit".into()).into();
        let AppError::ValidationError(errors) = app else {
            panic!("expected validation error");
        };

        let fields = errors.field_errors();
        let password = fields.get("password").expect("password entry");
        assert_eq!(password[0].message.as_deref(), Some("needs a digit"));
    }

    #[test]
    fn test_status_codes() {
        let consistency = AccountError::Consistency("seller insert failed".into()).into_response();
        assert_eq!(consistency.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let hash = AccountError::PasswordHash("bad salt".into()).into_response();
        assert_eq!(hash.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let duplicate = AccountError::DuplicateEmail("a@x.com".into()).into_response();
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_errors_keep_their_kind() {
        let pool = AccountError::from(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert_eq!(pool.reason(), "database");
        assert_eq!(pool.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let exec = AccountError::from(DbErr::Exec(RuntimeErr::Internal("fk violation".into())));
        assert_eq!(exec.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
