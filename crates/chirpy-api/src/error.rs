use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use chirpy_auth::{PasswordError, TokenError};
use chirpy_db::DbError;
use chirpy_types::api::ErrorResponse;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Json(rejection) => rejection.status(),
            Self::Token(TokenError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized(_) | Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Db(DbError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Db(DbError::EmailTaken(_)) => StatusCode::CONFLICT,
            Self::Internal(_) | Self::Db(_) | Self::Password(_) | Self::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message sent to the client. Internal failures stay opaque.
    fn public_message(&self) -> String {
        match self {
            Self::Internal(_) | Self::Password(_) | Self::Join(_) => "Something went wrong".to_string(),
            Self::Db(DbError::NotFound { kind, .. }) => format!("Couldn't find {}", kind),
            Self::Db(DbError::EmailTaken(_)) => "Email already in use".to_string(),
            Self::Db(_) => "Something went wrong".to_string(),
            Self::Json(rejection) => rejection.body_text(),
            Self::Token(TokenError::Signing(_)) => "Something went wrong".to_string(),
            Self::Token(TokenError::Expired) => "Token expired".to_string(),
            Self::Token(_) => "Invalid token".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Responding with {}: {}", status, self);
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
