//! Extractors that turn axum's body and path rejections into 422 responses
//! shaped like the validation errors produced by `BookPayload::validate`.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::api::FieldError;
use crate::error::HandlerError;

#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(data)) => Ok(ValidJson(data)),
            Err(rejection) => Err(json_rejection(rejection).into()),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> Vec<FieldError> {
    let kind = match &rejection {
        JsonRejection::JsonDataError(_) => "type_error",
        JsonRejection::JsonSyntaxError(_) => "json_invalid",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        _ => "body_error",
    };
    let text = rejection.body_text();
    tracing::debug!(rejection = %text, "rejected request body");

    if let JsonRejection::JsonDataError(_) = rejection {
        if let Some(field) = missing_field(&text) {
            return vec![FieldError::new(&["body", field], "Field required", "missing")];
        }
    }
    vec![FieldError::new(&["body"], text, kind)]
}

/// Pulls the field name out of serde's "missing field `name`" message.
fn missing_field(text: &str) -> Option<&str> {
    let start = text.find("missing field `")? + "missing field `".len();
    let len = text[start..].find('`')?;
    Some(&text[start..start + len])
}

#[derive(Debug)]
pub struct ValidPath<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidPath(value)),
            Err(rejection) => Err(path_rejection(rejection).into()),
        }
    }
}

fn path_rejection(rejection: PathRejection) -> Vec<FieldError> {
    vec![FieldError::new(&["path", "id"], rejection.body_text(), "int_parsing")]
}
