use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::info;

use crate::api::{BookPayload, HealthResponse, MessageResponse};
use crate::db::Database;
use crate::error::HandlerError;
use crate::extract::{ValidJson, ValidPath};
use crate::model::Book;
use crate::repo::BookRepository;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

type HandlerResult<T> = Result<Json<T>, HandlerError>;

pub async fn healthcheck() -> Json<HealthResponse> {
    info!("got healthcheck request");
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}

pub async fn list_books(State(state): State<AppState>) -> HandlerResult<Vec<Book>> {
    let session = state.db.session().await?;
    let books = BookRepository::new(&session).list_books().await?;

    tracing::debug!(count = books.len(), "listed books");
    Ok(Json(books))
}

pub async fn get_book(ValidPath(id): ValidPath<i64>, State(state): State<AppState>) -> HandlerResult<Book> {
    let session = state.db.session().await?;

    match BookRepository::new(&session).get_book(id).await? {
        Some(book) => Ok(Json(book)),
        None => Err(HandlerError::book_not_found()),
    }
}

pub async fn create_book(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<BookPayload>,
) -> HandlerResult<Book> {
    let input = payload.validate()?;

    let session = state.db.session().await?;
    let book = BookRepository::new(&session).create_book(input).await?;

    info!(book_id = book.id, "created book");
    Ok(Json(book))
}

pub async fn update_book(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<BookPayload>,
) -> HandlerResult<Book> {
    let input = payload.validate()?;

    let session = state.db.session().await?;
    match BookRepository::new(&session).update_book(id, input).await? {
        Some(book) => {
            info!(book_id = book.id, "updated book");
            Ok(Json(book))
        }
        None => Err(HandlerError::book_not_found()),
    }
}

pub async fn delete_book(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
) -> HandlerResult<MessageResponse> {
    let session = state.db.session().await?;

    match BookRepository::new(&session).delete_book(id).await? {
        Some(book) => {
            info!(book_id = book.id, "deleted book");
            Ok(Json(MessageResponse::new_from_msg("Book deleted")))
        }
        None => Err(HandlerError::book_not_found()),
    }
}
