use axum::{Json, http::StatusCode, response::IntoResponse};
use pinlog_common::views::ApiErrorResponse;
use pinlog_db::storage::StoreError;
use thiserror::Error;

use crate::auth::AuthError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    InternalAnyhow(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Auth(ae) => match ae {
                AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::FORBIDDEN,
                AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Storage(_) | Self::InternalAnyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        let status = err.status_code();

        let code = match status {
            StatusCode::BAD_REQUEST => "BadRequest",
            StatusCode::FORBIDDEN => "Forbidden",
            _ => "InternalError",
        };

        // Server errors never carry their cause to the caller.
        let error = if status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            err.to_string()
        };

        ApiErrorResponse {
            code: Some(code.into()),
            error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("Error returned by handler: {self}");
        } else {
            tracing::debug!("Request rejected: {self}");
        }

        (status_code, Json(Into::<ApiErrorResponse>::into(self))).into_response()
    }
}
