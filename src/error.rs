use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("ValidationError: {0:?}")]
    ValidationError(Vec<FieldError>),
    #[error("NotFound: {0}")]
    NotFound(&'static str),
    #[error("StorageError: {0:#}")]
    StorageError(#[from] anyhow::Error),
}

impl HandlerError {
    pub fn book_not_found() -> Self {
        HandlerError::NotFound("Book not found")
    }

    pub fn status(&self) -> StatusCode {
        use HandlerError::*;
        match self {
            ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            NotFound(_) => StatusCode::NOT_FOUND,
            StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Vec<FieldError>> for HandlerError {
    fn from(errors: Vec<FieldError>) -> Self {
        HandlerError::ValidationError(errors)
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            HandlerError::ValidationError(errors) => json!({ "detail": errors }),
            HandlerError::NotFound(msg) => json!({ "detail": msg }),
            HandlerError::StorageError(e) => {
                tracing::error!(error = %crate::unpack_error(&*e), "storage failure");
                json!({ "detail": "Internal Server Error" })
            }
        };

        (status, Json(body)).into_response()
    }
}
