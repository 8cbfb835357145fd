use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use crate::core::{FilterError, PaymentError};
use crate::models::ErrorResponse;
use crate::services::{AuthError, SubmissionError, SupabaseError};
use thiserror::Error;

/// Generic message shown for failures of the remote backend
const REMOTE_FAILURE_MESSAGE: &str = "Something went wrong, please try again later";

/// Errors returned by the HTTP handlers
///
/// Remote failures are reported with a generic message; details only go to
/// the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Please sign in to continue")]
    LoginRequired,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("This page requires the {0} role")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error("{}", REMOTE_FAILURE_MESSAGE)]
    SubmissionFailed,

    #[error("{}", REMOTE_FAILURE_MESSAGE)]
    Remote(SupabaseError),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::LoginRequired => "login_required",
            ApiError::InvalidSession(_) => "invalid_session",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::SubmissionFailed => "submission_failed",
            ApiError::Remote(_) => "remote_unavailable",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::LoginRequired | ApiError::InvalidSession(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SubmissionFailed | ApiError::Remote(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if let ApiError::Remote(e) = self {
            tracing::error!("Remote backend failure: {}", e);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

impl From<SupabaseError> for ApiError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Unauthorized => ApiError::InvalidSession("rejected by the auth service".to_string()),
            other => ApiError::Remote(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::LoginRequired => ApiError::LoginRequired,
            AuthError::InvalidToken(reason) => ApiError::InvalidSession(reason),
            AuthError::Forbidden(role) => ApiError::Forbidden(role),
            AuthError::InvalidRecoveryLink(reason) => ApiError::Validation(format!("Invalid recovery link: {}", reason)),
            AuthError::Remote(e) => e.into(),
        }
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Auth(e) => e.into(),
            SubmissionError::Validation(errors) => ApiError::Validation(errors.to_string()),
            SubmissionError::InvalidRequest(reason) => ApiError::Validation(reason),
            SubmissionError::Store { .. } => ApiError::SubmissionFailed,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::LoginRequired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden("owner").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(SupabaseError::ApiError("boom".to_string())).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_remote_details_are_hidden() {
        let err = ApiError::from(SupabaseError::ApiError("relation does not exist".to_string()));
        assert_eq!(err.to_string(), REMOTE_FAILURE_MESSAGE);
    }
}
